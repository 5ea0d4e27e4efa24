//! Zobrist keys used to fingerprint positions for repetition detection.
//!
//! A position's key is the XOR of one random value per occupied square,
//! one for Black to move, one per castling right and one for the
//! en-passant file.

use crate::types::Piece;

pub struct ZobristKeys {
    /// Indexed by `[color][piece_kind][square]`.
    pub pieces: [[[u64; 64]; 6]; 2],
    pub side_to_move: u64,
    /// `[wk, wq, bk, bq]`
    pub castling: [u64; 4],
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

impl ZobristKeys {
    /// Deterministic keys from a fixed xorshift64 seed, usable in const context.
    pub const fn new() -> Self {
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut i = 0;
        while i < 2 * 6 * 64 {
            state = xorshift64(state);
            pieces[i / 384][(i / 64) % 6][i % 64] = state;
            i += 1;
        }

        state = xorshift64(state);
        let side_to_move = state;

        let mut castling = [0u64; 4];
        let mut c = 0;
        while c < 4 {
            state = xorshift64(state);
            castling[c] = state;
            c += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut f = 0;
        while f < 8 {
            state = xorshift64(state);
            en_passant[f] = state;
            f += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// 0=wk, 1=wq, 2=bk, 3=bq
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
