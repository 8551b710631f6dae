//! Zobrist hashing keys for chess positions.
//!
//! One fixed random 64-bit key per (piece kind, color, square), one for
//! "White to move", one per castling right, and one per en-passant file,
//! all drawn from a fixed seed so hashes are reproducible across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, PieceKind, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[kind][color][square]
    piece_keys: [[[u64; 64]; 2]; 6],
    white_to_move_key: u64,
    // castling_keys[color][side]: 0 = kingside, 1 = queenside
    castling_keys: [[u64; 2]; 2],
    // en_passant_keys[file]: only the file of the target matters
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x5EED_CAB1_E5C0_FFEE);
        let mut piece_keys = [[[0u64; 64]; 2]; 6];
        let mut castling_keys = [[0u64; 2]; 2];
        let mut en_passant_keys = [0u64; 8];

        for kind in &mut piece_keys {
            for color in kind.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let white_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            white_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

/// Key for a piece of `kind` and `color` standing on `sq`
#[inline]
pub(crate) fn piece_key(kind: PieceKind, color: Color, sq: Square) -> u64 {
    ZOBRIST.piece_keys[kind.index()][color.index()][sq.as_index()]
}

/// Key XORed in while White is to move
#[inline]
pub(crate) fn side_to_move_key() -> u64 {
    ZOBRIST.white_to_move_key
}

/// Key for one castling right
#[inline]
pub(crate) fn castling_key(color: Color, kingside: bool) -> u64 {
    ZOBRIST.castling_keys[color.index()][if kingside { 0 } else { 1 }]
}

/// Key for an en-passant target on `file`
#[inline]
pub(crate) fn en_passant_key(file: usize) -> u64 {
    ZOBRIST.en_passant_keys[file]
}
