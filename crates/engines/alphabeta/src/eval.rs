//! Material plus piece-square evaluation.

use chess_core::{Color, Piece, PieceKind, Position};

use crate::pst::{positional_value, Phase};

/// Material values in centipawns, indexed by PieceKind::idx().
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

#[inline]
pub fn material_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

/// Late game is signalled by the absence of queens on both sides; it only
/// switches the king's table.
pub fn is_late_game(pos: &Position) -> bool {
    !pos.has_queens()
}

/// White-centric static score in centipawns.
///
/// Each piece contributes its material value plus its table bonus, added for
/// White and subtracted for Black. Side to move plays no part.
pub fn evaluate(pos: &Position) -> i32 {
    let phase = if is_late_game(pos) {
        Phase::Endgame
    } else {
        Phase::Middlegame
    };

    pos.pieces()
        .map(|(sq, piece)| {
            let value = material_value(piece.kind) + positional_value(piece, sq, phase);
            signed(piece, value)
        })
        .sum()
}

#[inline]
fn signed(piece: Piece, value: i32) -> i32 {
    match piece.color {
        Color::White => value,
        Color::Black => -value,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
