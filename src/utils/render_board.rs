//! Terminal-oriented board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and harness
//! output in text environments. Row 0 is printed at the top so the layout
//! matches the internal row/column indexing.

use crate::game_state::amazons_types::BOARD_SIZE;
use crate::game_state::board::Board;

/// Render the board to a string: `W`/`B` for amazons, `x` for arrows,
/// `·` for empty squares.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("   0 1 2 3 4 5 6 7 8 9\n");

    for row in 0..BOARD_SIZE as u8 {
        out.push(char::from(b'0' + row));
        out.push(' ');
        out.push(' ');

        for col in 0..BOARD_SIZE as u8 {
            let square = if board.is_white(row, col) {
                'W'
            } else if board.is_black(row, col) {
                'B'
            } else if board.is_arrow(row, col) {
                'x'
            } else {
                '·'
            };
            out.push(square);
            if col < (BOARD_SIZE as u8) - 1 {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out
}
