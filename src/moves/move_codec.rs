//! Packed move representation.
//!
//! A ply (amazon relocation plus arrow shot) is packed into a single `u32`
//! as six 4-bit portions: colour, amazon roster index, finish row, finish
//! column, arrow row, arrow column. The start square is deliberately not
//! stored; it is recovered from the board's amazon roster at apply time, so
//! a packed move is only meaningful relative to the board it was generated
//! from (or one holding the same amazon position).

use std::fmt;

use crate::game_state::amazons_types::Color;

const PORTION_COLOUR: u32 = 0;
const PORTION_AMAZON_INDEX: u32 = 1;
const PORTION_FINISH_ROW: u32 = 2;
const PORTION_FINISH_COL: u32 = 3;
const PORTION_ARROW_ROW: u32 = 4;
const PORTION_ARROW_COL: u32 = 5;

#[inline]
const fn portion(bits: u32, which: u32) -> u32 {
    (bits >> (4 * which)) & 0xF
}

/// A complete ply packed into a `u32`.
///
/// Field values must fit 4 bits. The constructor asserts ranges in debug
/// builds; out-of-range values would silently corrupt adjacent portions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    pub fn new(
        colour: Color,
        amazon_index: usize,
        finish_row: u8,
        finish_col: u8,
        arrow_row: u8,
        arrow_col: u8,
    ) -> Self {
        debug_assert!(amazon_index < 4, "amazon index out of range");
        debug_assert!(finish_row < 10 && finish_col < 10, "finish out of range");
        debug_assert!(arrow_row < 10 && arrow_col < 10, "arrow out of range");

        let mut bits = 0u32;
        bits |= (colour.index() as u32 & 0xF) << (4 * PORTION_COLOUR);
        bits |= (amazon_index as u32 & 0xF) << (4 * PORTION_AMAZON_INDEX);
        bits |= (u32::from(finish_row) & 0xF) << (4 * PORTION_FINISH_ROW);
        bits |= (u32::from(finish_col) & 0xF) << (4 * PORTION_FINISH_COL);
        bits |= (u32::from(arrow_row) & 0xF) << (4 * PORTION_ARROW_ROW);
        bits |= (u32::from(arrow_col) & 0xF) << (4 * PORTION_ARROW_COL);
        Move(bits)
    }

    /// Reconstruct a move from its raw packed bits (e.g. out of a table).
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Move(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn colour(self) -> Color {
        // Only the low bit is meaningful for a well-formed move.
        Color::from_index((portion(self.0, PORTION_COLOUR) & 1) as usize)
            .unwrap_or(Color::White)
    }

    #[inline]
    pub const fn amazon_index(self) -> usize {
        portion(self.0, PORTION_AMAZON_INDEX) as usize
    }

    #[inline]
    pub const fn finish_row(self) -> u8 {
        portion(self.0, PORTION_FINISH_ROW) as u8
    }

    #[inline]
    pub const fn finish_col(self) -> u8 {
        portion(self.0, PORTION_FINISH_COL) as u8
    }

    #[inline]
    pub const fn arrow_row(self) -> u8 {
        portion(self.0, PORTION_ARROW_ROW) as u8
    }

    #[inline]
    pub const fn arrow_col(self) -> u8 {
        portion(self.0, PORTION_ARROW_COL) as u8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}->({},{})x({},{})",
            self.amazon_index(),
            self.finish_row(),
            self.finish_col(),
            self.arrow_row(),
            self.arrow_col()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_round_trips_all_fields() {
        for colour in [Color::White, Color::Black] {
            for amazon in 0..4usize {
                for coord in 0..10u8 {
                    let mv = Move::new(colour, amazon, coord, 9 - coord, coord / 2, coord);
                    assert_eq!(mv.colour(), colour);
                    assert_eq!(mv.amazon_index(), amazon);
                    assert_eq!(mv.finish_row(), coord);
                    assert_eq!(mv.finish_col(), 9 - coord);
                    assert_eq!(mv.arrow_row(), coord / 2);
                    assert_eq!(mv.arrow_col(), coord);
                }
            }
        }
    }

    #[test]
    fn bits_round_trip() {
        let mv = Move::new(Color::Black, 3, 9, 9, 0, 5);
        assert_eq!(Move::from_bits(mv.bits()), mv);
    }

    #[test]
    fn display_is_compact() {
        let mv = Move::new(Color::White, 2, 5, 6, 7, 8);
        assert_eq!(mv.to_string(), "#2->(5,6)x(7,8)");
    }
}
