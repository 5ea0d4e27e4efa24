//! Scoped apply/undo over a borrowed position.

use std::ops::{Deref, DerefMut};

use chess_core::{legal_moves_into, pseudo_legal_moves_into, Move, Position, Undo};

use crate::config::CandidateSet;

/// A move applied to a borrowed position. Dereferences to the position in
/// its post-move state and takes the move back when dropped, so every apply
/// is matched by exactly one undo on every exit path.
pub struct Applied<'a> {
    pos: &'a mut Position,
    mv: Move,
    undo: Option<Undo>,
}

/// Plays `mv` on `pos` until the returned guard goes out of scope.
///
/// `mv` must come from [`candidates`] for the current position.
pub fn apply(pos: &mut Position, mv: Move) -> Applied<'_> {
    let undo = pos.make_move(mv);
    Applied {
        pos,
        mv,
        undo: Some(undo),
    }
}

impl Applied<'_> {
    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl Deref for Applied<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.pos.unmake_move(self.mv, undo);
        }
    }
}

/// Fills `out` with the moves a node expands, in generation order.
pub fn candidates(pos: &mut Position, set: CandidateSet, out: &mut Vec<Move>) {
    legal_moves_into(pos, out);
    if set == CandidateSet::LegalAndPseudoLegal {
        let legal_len = out.len();
        let mut pseudo = Vec::with_capacity(64);
        pseudo_legal_moves_into(pos, &mut pseudo);
        for mv in pseudo {
            if !out[..legal_len].contains(&mv) {
                out.push(mv);
            }
        }
    }
}

#[cfg(test)]
#[path = "applier_tests.rs"]
mod applier_tests;
