//! Zobrist hashing for board positions.
//!
//! Keys are 32 bits: one random constant per (occupant kind, square),
//! generated from a fixed seed so hashes are deterministic across runs. A
//! ply touches exactly three terms (amazon out, amazon in, arrow in), so
//! the incremental update is O(1) and, being XOR, its own inverse.

use std::sync::OnceLock;

use crate::game_state::amazons_types::{encode_square, Color, BOARD_SIZE};
use crate::game_state::board::Board;
use crate::moves::move_codec::Move;

/// What occupies a square, as far as hashing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Arrow,
    WhiteAmazon,
    BlackAmazon,
}

impl Occupant {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Occupant::Arrow => 0,
            Occupant::WhiteAmazon => 1,
            Occupant::BlackAmazon => 2,
        }
    }

    #[inline]
    pub const fn amazon_of(colour: Color) -> Self {
        match colour {
            Color::White => Occupant::WhiteAmazon,
            Color::Black => Occupant::BlackAmazon,
        }
    }
}

const SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Debug)]
struct ZobristTables {
    occupant_square: [[u32; SQUARES]; 3],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut occupant_square = [[0u32; SQUARES]; 3];
    for occupant in &mut occupant_square {
        for square in occupant.iter_mut() {
            *square = next_random_u64(&mut seed) as u32;
        }
    }
    ZobristTables { occupant_square }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// The Zobrist constant for one `(occupant, square)` pair.
#[inline]
pub fn occupant_key(occupant: Occupant, row: u8, col: u8) -> u32 {
    tables().occupant_square[occupant.index()][encode_square(row, col) as usize]
}

/// Full-board hash: XOR over every occupied square.
pub fn compute_board_hash(board: &Board) -> u32 {
    let mut key = 0u32;
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            if !board.is_occupied(row, col) {
                continue;
            }
            let occupant = if board.is_white(row, col) {
                Occupant::WhiteAmazon
            } else if board.is_black(row, col) {
                Occupant::BlackAmazon
            } else {
                Occupant::Arrow
            };
            key ^= occupant_key(occupant, row, col);
        }
    }
    key
}

/// Incremental O(1) update for one ply: XOR the amazon out of its old
/// square, into its finish square, and the arrow into its square. Applying
/// the same update twice restores the original key, so this function also
/// undoes a move.
pub fn update_hash_by_move(key: u32, mv: Move, old_row: u8, old_col: u8) -> u32 {
    let amazon = Occupant::amazon_of(mv.colour());
    key ^ occupant_key(amazon, old_row, old_col)
        ^ occupant_key(amazon, mv.finish_row(), mv.finish_col())
        ^ occupant_key(Occupant::Arrow, mv.arrow_row(), mv.arrow_col())
}
