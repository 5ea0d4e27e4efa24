//! A position together with the move list and key history a game needs to
//! decide when it is over.

use std::fmt;

use crate::board::Position;
use crate::movegen::{legal_moves, legal_moves_into};
use crate::types::{Color, Move};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token.
    pub fn result_str(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Outcome::Stalemate => f.write_str("stalemate"),
            Outcome::InsufficientMaterial => f.write_str("insufficient material"),
            Outcome::SeventyFiveMoves => f.write_str("seventy-five move rule"),
            Outcome::FivefoldRepetition => f.write_str("fivefold repetition"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    moves: Vec<Move>,
    /// Position keys after every ply, starting with the initial position.
    history: Vec<u64>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Position::startpos())
    }
}

impl Game {
    pub fn new(position: Position) -> Self {
        let history = vec![position.position_hash()];
        Self {
            position,
            moves: Vec::new(),
            history,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Mutable access for searches that apply and undo moves in place. The
    /// position must be back in its original state when the borrow ends.
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.position)
    }

    /// Plays a move that is known to be legal in the current position.
    pub fn play(&mut self, mv: Move) {
        self.position.make_move(mv);
        self.moves.push(mv);
        self.history.push(self.position.position_hash());
    }

    /// How many times the current position has occurred, itself included.
    pub fn repetition_count(&self) -> usize {
        let current = self.position.position_hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Checked in order: checkmate, insufficient material, stalemate, the
    /// seventy-five move rule, fivefold repetition.
    pub fn outcome(&self) -> Option<Outcome> {
        let mut scratch = self.position.clone();
        let mut moves = Vec::new();
        legal_moves_into(&mut scratch, &mut moves);
        let side = self.position.side_to_move;

        if moves.is_empty() && self.position.in_check(side) {
            return Some(Outcome::Checkmate {
                winner: side.other(),
            });
        }
        if self.position.is_insufficient_material() {
            return Some(Outcome::InsufficientMaterial);
        }
        if moves.is_empty() {
            return Some(Outcome::Stalemate);
        }
        if self.position.is_seventyfive_move_draw() {
            return Some(Outcome::SeventyFiveMoves);
        }
        if self.repetition_count() >= 5 {
            return Some(Outcome::FivefoldRepetition);
        }
        None
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
