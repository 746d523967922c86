//! Ray-cast move generation.
//!
//! For each amazon of the moving side, rays are cast in the eight queen
//! directions to enumerate finish squares; from every finish square the
//! same rays are cast again, with the vacated origin treated as empty, to
//! enumerate arrow squares. Every (finish, arrow) pair becomes one packed
//! move. Each scan is bounded by board edges and obstructions, so
//! generation always terminates.

use crate::game_state::amazons_types::{
    decode_col, decode_row, Color, PackedSquare, AMAZONS_PER_SIDE, BOARD_SIZE, DIRECTIONS,
};
use crate::game_state::board::Board;
use crate::moves::move_codec::Move;
use crate::moves::move_list::MoveList;

/// Generate every legal ply for `side` on `board`.
pub fn generate_moves(board: &Board, side: Color) -> MoveList {
    let mut list = MoveList::new();
    generate_moves_into(board, side, &mut list);
    list
}

/// Generate into a caller-owned list, resetting it first. Lets the search
/// reuse one buffer per frame.
pub fn generate_moves_into(board: &Board, side: Color, list: &mut MoveList) {
    list.reset();

    for index in 0..AMAZONS_PER_SIDE {
        let packed = board.amazon_position(side, index);
        let start_row = decode_row(packed);
        let start_col = decode_col(packed);

        for &(dr, dc) in &DIRECTIONS {
            let mut fin_row = i16::from(start_row) + i16::from(dr);
            let mut fin_col = i16::from(start_col) + i16::from(dc);

            while in_bounds(fin_row, fin_col) && !board.is_occupied(fin_row as u8, fin_col as u8)
            {
                push_arrow_moves(
                    board,
                    side,
                    index,
                    (start_row, start_col),
                    (fin_row as u8, fin_col as u8),
                    list,
                );
                fin_row += i16::from(dr);
                fin_col += i16::from(dc);
            }
        }
    }
}

/// For a fixed finish square, enumerate every arrow target. The vacated
/// start square counts as empty because the amazon has already left it.
fn push_arrow_moves(
    board: &Board,
    side: Color,
    index: usize,
    start: (u8, u8),
    finish: (u8, u8),
    list: &mut MoveList,
) {
    for &(dr, dc) in &DIRECTIONS {
        let mut arr_row = i16::from(finish.0) + i16::from(dr);
        let mut arr_col = i16::from(finish.1) + i16::from(dc);

        while in_bounds(arr_row, arr_col) {
            let (r, c) = (arr_row as u8, arr_col as u8);
            if board.is_occupied(r, c) && (r, c) != start {
                break;
            }
            list.push(Move::new(side, index, finish.0, finish.1, r, c));
            arr_row += i16::from(dr);
            arr_col += i16::from(dc);
        }
    }
}

/// Number of finish squares reachable from one amazon position.
pub fn mobility(board: &Board, position: PackedSquare) -> u32 {
    let row = decode_row(position);
    let col = decode_col(position);
    let mut count = 0;

    for &(dr, dc) in &DIRECTIONS {
        let mut r = i16::from(row) + i16::from(dr);
        let mut c = i16::from(col) + i16::from(dc);
        while in_bounds(r, c) && !board.is_occupied(r as u8, c as u8) {
            count += 1;
            r += i16::from(dr);
            c += i16::from(dc);
        }
    }
    count
}

/// A side can play as long as any of its amazons has a reachable finish
/// square (any finish square implies at least one arrow square, the origin).
pub fn side_has_moves(board: &Board, side: Color) -> bool {
    (0..AMAZONS_PER_SIDE).any(|i| mobility(board, board.amazon_position(side, i)) > 0)
}

#[inline]
fn in_bounds(row: i16, col: i16) -> bool {
    (0..BOARD_SIZE as i16).contains(&row) && (0..BOARD_SIZE as i16).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_has_the_known_move_count() {
        let board = Board::new_game();
        let white = generate_moves(&board, Color::White);
        let black = generate_moves(&board, Color::Black);
        assert_eq!(white.len(), 2176);
        assert_eq!(black.len(), 2176);
    }

    #[test]
    fn every_generated_move_is_ray_legal() {
        let board = Board::new_game();
        let mut list = generate_moves(&board, Color::White);
        assert!(!list.is_empty());
        while list.has_next() {
            let index = list.next_index();
            let mv = list.get(index);
            let packed = board.amazon_position(Color::White, mv.amazon_index());
            let (sr, sc) = (decode_row(packed), decode_col(packed));
            assert!(board.is_valid_move(sr, sc, mv.finish_row(), mv.finish_col()));
        }
    }

    #[test]
    fn boxed_in_amazon_has_zero_mobility() {
        let mut board = Board::new_game();
        for &(r, c) in &[(9u8, 2u8), (9u8, 4u8), (8u8, 2u8), (8u8, 3u8), (8u8, 4u8)] {
            board.place_arrow(9, 3, r, c).expect("arrow should place");
        }
        assert_eq!(mobility(&board, board.amazon_position(Color::White, 1)), 0);
        // The side as a whole still has moves through its other amazons.
        assert!(side_has_moves(&board, Color::White));
    }

    #[test]
    fn mobility_counts_finish_squares_only() {
        let board = Board::new_game();
        // (6,0): 8 right, 3 down, 2 up, 2 down-right, 5 up-right.
        let white0 = board.amazon_position(Color::White, 0);
        assert_eq!(mobility(&board, white0), 20);
    }
}
