//! Core shared types for the Amazons engine.
//!
//! Positions are packed into a single byte as `col * SIZE + row`, matching
//! the layout the board stores in its amazon roster, so move generation and
//! hashing can pass squares around without tuple churn.

/// Size of one dimension of the board.
pub const BOARD_SIZE: usize = 10;

/// Upper bound on plies one side can have from any position. Used to size
/// move buffers once so generation never reallocates.
pub const MAX_MOVES_PER_SIDE: usize = 2176;

/// Amazons per side. Pieces are never captured, so this never changes.
pub const AMAZONS_PER_SIDE: usize = 4;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }
}

/// One cell of the occupancy grid. The grid does not distinguish amazons
/// from arrows; amazon identity lives in the board's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied,
}

/// A board square packed into one byte as `col * SIZE + row`.
pub type PackedSquare = u8;

#[inline]
pub const fn encode_square(row: u8, col: u8) -> PackedSquare {
    col * (BOARD_SIZE as u8) + row
}

#[inline]
pub const fn decode_row(square: PackedSquare) -> u8 {
    square % (BOARD_SIZE as u8)
}

#[inline]
pub const fn decode_col(square: PackedSquare) -> u8 {
    square / (BOARD_SIZE as u8)
}

/// The eight queen-ray directions as `(row_step, col_step)` pairs.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_codec_round_trips() {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let packed = encode_square(row, col);
                assert_eq!(decode_row(packed), row);
                assert_eq!(decode_col(packed), col);
            }
        }
    }

    #[test]
    fn color_opposite_is_involutive() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite().opposite(), Color::Black);
    }
}
