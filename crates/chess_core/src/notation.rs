//! Long algebraic (UCI style) move text: `e2e4`, `e7e8q`, `e1g1`.

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&sq_to_coord(mv.from));
    s.push_str(&sq_to_coord(mv.to));
    if let Some(p) = mv.promo {
        s.push(match p {
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => 'q',
        });
    }
    s
}

/// Resolves move text against the legal moves of `pos`, so the returned move
/// carries the right castling and en-passant flags. A promotion without a
/// suffix resolves to the queen.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = coord_to_sq(&txt[0..2])?;
    let to = coord_to_sq(&txt[2..4])?;
    let promo = match txt.as_bytes().get(4).map(|b| b.to_ascii_lowercase()) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return None,
    };

    legal_moves(pos)
        .into_iter()
        .filter(|m| m.from == from && m.to == to)
        .find(|m| promo.is_none() || m.promo == promo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn castling_and_en_passant_flags_come_from_generator() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/R3K2R w KQ d6 0 2").unwrap();
        let castle = parse_uci_move(&pos, "e1g1").unwrap();
        assert!(castle.is_castle);
        let ep = parse_uci_move(&pos, "e5d6").unwrap();
        assert!(ep.is_en_passant);
    }

    #[test]
    fn promotion_suffix() {
        let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let knight = parse_uci_move(&pos, "a7a8n").unwrap();
        assert_eq!(knight.promo, Some(PieceKind::Knight));
        assert_eq!(knight.to_string(), "a7a8n");
        let bare = parse_uci_move(&pos, "a7a8").unwrap();
        assert_eq!(bare.promo, Some(PieceKind::Queen));
        assert!(parse_uci_move(&pos, "a7a8x").is_none());
    }

    #[test]
    fn rejects_illegal_and_garbage() {
        let pos = Position::startpos();
        assert!(parse_uci_move(&pos, "e2e5").is_none());
        assert!(parse_uci_move(&pos, "zz").is_none());
        assert!(parse_uci_move(&pos, "e2e4").is_some());
    }
}
