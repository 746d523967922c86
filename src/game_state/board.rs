//! Canonical game state: the occupancy grid plus the amazon roster.
//!
//! The board is mutated destructively during search by make/unmake pairs.
//! `apply_move` returns an [`UndoToken`] carrying the amazon's pre-move
//! square, so the caller cannot feed `undo_move` a wrong origin; undo also
//! verifies the amazon actually sits on the square the move claims before
//! rolling anything back. A mismatch is reported as an error instead of
//! silently corrupting the rest of the search.

use std::error::Error;
use std::fmt;

use crate::game_state::amazons_types::{
    decode_col, decode_row, encode_square, Cell, Color, PackedSquare, AMAZONS_PER_SIDE,
    BOARD_SIZE,
};
use crate::moves::move_codec::Move;

pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A coordinate fell outside the 10x10 grid.
    OutOfBounds,
    /// The requested relocation is not a clear queen ray.
    InvalidRay,
    /// The destination square is already occupied.
    SquareOccupied,
    /// No amazon of the given colour sits on the claimed start square.
    NoAmazonAtStart,
    /// `undo_move` was asked to roll back a move whose finish square does
    /// not hold the claimed amazon. The board has diverged from the move.
    UndoMismatch,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds => write!(f, "coordinate outside the board"),
            BoardError::InvalidRay => write!(f, "move is not a clear queen ray"),
            BoardError::SquareOccupied => write!(f, "destination square is occupied"),
            BoardError::NoAmazonAtStart => write!(f, "no amazon on the start square"),
            BoardError::UndoMismatch => {
                write!(f, "undo does not match the amazon's current square")
            }
        }
    }
}

impl Error for BoardError {}

/// Proof that a move was applied, carrying what `undo_move` needs to roll
/// it back exactly.
#[derive(Debug, Clone, Copy)]
pub struct UndoToken {
    mv: Move,
    old_row: u8,
    old_col: u8,
}

impl UndoToken {
    #[inline]
    pub fn mv(&self) -> Move {
        self.mv
    }

    #[inline]
    pub fn old_row(&self) -> u8 {
        self.old_row
    }

    #[inline]
    pub fn old_col(&self) -> u8 {
        self.old_col
    }
}

/// The 10x10 Amazons board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    /// Packed positions of each side's four amazons, white first.
    amazons: [[PackedSquare; AMAZONS_PER_SIDE]; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    /// Construct the canonical starting layout: white on (6,0), (9,3),
    /// (9,6), (6,9); black mirrored on the top half.
    pub fn new_game() -> Self {
        let mut board = Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            amazons: [[0; AMAZONS_PER_SIDE]; 2],
        };

        let white_start = [(6, 0), (9, 3), (9, 6), (6, 9)];
        let black_start = [(3, 0), (0, 3), (0, 6), (3, 9)];

        for (i, &(row, col)) in white_start.iter().enumerate() {
            board.cells[row as usize][col as usize] = Cell::Occupied;
            board.amazons[Color::White.index()][i] = encode_square(row, col);
        }
        for (i, &(row, col)) in black_start.iter().enumerate() {
            board.cells[row as usize][col as usize] = Cell::Occupied;
            board.amazons[Color::Black.index()][i] = encode_square(row, col);
        }

        board
    }

    /// Construct an arbitrary position from amazon squares and arrows.
    /// Used for endgame setups and tests; rejects overlapping occupants.
    pub fn from_positions(
        white: [(u8, u8); AMAZONS_PER_SIDE],
        black: [(u8, u8); AMAZONS_PER_SIDE],
        arrows: &[(u8, u8)],
    ) -> BoardResult<Self> {
        let mut board = Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            amazons: [[0; AMAZONS_PER_SIDE]; 2],
        };

        let mut occupy = |board: &mut Board, row: u8, col: u8| -> BoardResult<()> {
            if row >= BOARD_SIZE as u8 || col >= BOARD_SIZE as u8 {
                return Err(BoardError::OutOfBounds);
            }
            if board.is_occupied(row, col) {
                return Err(BoardError::SquareOccupied);
            }
            board.cells[row as usize][col as usize] = Cell::Occupied;
            Ok(())
        };

        for (i, &(row, col)) in white.iter().enumerate() {
            occupy(&mut board, row, col)?;
            board.amazons[Color::White.index()][i] = encode_square(row, col);
        }
        for (i, &(row, col)) in black.iter().enumerate() {
            occupy(&mut board, row, col)?;
            board.amazons[Color::Black.index()][i] = encode_square(row, col);
        }
        for &(row, col) in arrows {
            occupy(&mut board, row, col)?;
        }
        Ok(board)
    }

    #[inline]
    pub fn is_occupied(&self, row: u8, col: u8) -> bool {
        self.cells[row as usize][col as usize] != Cell::Empty
    }

    /// Packed position of one amazon in the roster.
    #[inline]
    pub fn amazon_position(&self, colour: Color, index: usize) -> PackedSquare {
        self.amazons[colour.index()][index]
    }

    pub fn is_white(&self, row: u8, col: u8) -> bool {
        self.holds_amazon(Color::White, row, col)
    }

    pub fn is_black(&self, row: u8, col: u8) -> bool {
        self.holds_amazon(Color::Black, row, col)
    }

    /// An arrow is any occupied square that holds no amazon.
    pub fn is_arrow(&self, row: u8, col: u8) -> bool {
        self.is_occupied(row, col) && !self.is_white(row, col) && !self.is_black(row, col)
    }

    fn holds_amazon(&self, colour: Color, row: u8, col: u8) -> bool {
        let packed = encode_square(row, col);
        self.amazons[colour.index()].contains(&packed)
    }

    /// Roster index of the amazon on `(row, col)`, if any.
    pub fn amazon_index_at(&self, colour: Color, row: u8, col: u8) -> Option<usize> {
        let packed = encode_square(row, col);
        self.amazons[colour.index()].iter().position(|&p| p == packed)
    }

    /// Check that `(row_s, col_s) -> (row_f, col_f)` is a clear queen ray:
    /// straight or diagonal, within bounds, ending on an empty square with
    /// nothing in between.
    pub fn is_valid_move(&self, row_s: u8, col_s: u8, row_f: u8, col_f: u8) -> bool {
        let size = BOARD_SIZE as u8;
        if row_s >= size || col_s >= size || row_f >= size || col_f >= size {
            return false;
        }
        if row_s == row_f && col_s == col_f {
            return false;
        }

        let dr = i16::from(row_f) - i16::from(row_s);
        let dc = i16::from(col_f) - i16::from(col_s);
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return false;
        }
        if self.is_occupied(row_f, col_f) {
            return false;
        }

        let step_r = dr.signum();
        let step_c = dc.signum();
        let mut r = i16::from(row_s) + step_r;
        let mut c = i16::from(col_s) + step_c;
        while (r, c) != (i16::from(row_f), i16::from(col_f)) {
            if self.is_occupied(r as u8, c as u8) {
                return false;
            }
            r += step_r;
            c += step_c;
        }
        true
    }

    /// Relocate an amazon along a validated queen ray.
    pub fn move_amazon(
        &mut self,
        row_s: u8,
        col_s: u8,
        row_f: u8,
        col_f: u8,
        colour: Color,
    ) -> BoardResult<()> {
        if !self.is_valid_move(row_s, col_s, row_f, col_f) {
            return Err(BoardError::InvalidRay);
        }
        let index = self
            .amazon_index_at(colour, row_s, col_s)
            .ok_or(BoardError::NoAmazonAtStart)?;

        self.cells[row_s as usize][col_s as usize] = Cell::Empty;
        self.cells[row_f as usize][col_f as usize] = Cell::Occupied;
        self.amazons[colour.index()][index] = encode_square(row_f, col_f);
        Ok(())
    }

    /// Shoot an arrow from `(arow, acol)` to `(row_f, col_f)`.
    pub fn place_arrow(&mut self, arow: u8, acol: u8, row_f: u8, col_f: u8) -> BoardResult<()> {
        if !self.is_valid_move(arow, acol, row_f, col_f) {
            return Err(BoardError::InvalidRay);
        }
        self.cells[row_f as usize][col_f as usize] = Cell::Occupied;
        Ok(())
    }

    /// Compound ply: relocate an amazon, then shoot an arrow from its new
    /// square. The arrow may land on the vacated start square.
    #[allow(clippy::too_many_arguments)]
    pub fn move_piece(
        &mut self,
        row_s: u8,
        col_s: u8,
        row_f: u8,
        col_f: u8,
        arow: u8,
        acol: u8,
        colour: Color,
    ) -> BoardResult<()> {
        self.move_amazon(row_s, col_s, row_f, col_f, colour)?;
        if let Err(e) = self.place_arrow(row_f, col_f, arow, acol) {
            // Roll the relocation back so a rejected ply leaves no trace.
            let index = self
                .amazon_index_at(colour, row_f, col_f)
                .ok_or(BoardError::NoAmazonAtStart)?;
            self.cells[row_f as usize][col_f as usize] = Cell::Empty;
            self.cells[row_s as usize][col_s as usize] = Cell::Occupied;
            self.amazons[colour.index()][index] = encode_square(row_s, col_s);
            return Err(e);
        }
        Ok(())
    }

    /// Apply a generated move without ray re-validation. The move must have
    /// been produced for this exact board state. Cheap occupancy checks
    /// still catch a board/move divergence loudly.
    pub fn apply_move(&mut self, mv: Move) -> BoardResult<UndoToken> {
        let colour = mv.colour();
        let index = mv.amazon_index();
        let packed = self.amazons[colour.index()][index];
        let old_row = decode_row(packed);
        let old_col = decode_col(packed);
        let (fin_row, fin_col) = (mv.finish_row(), mv.finish_col());
        let (arr_row, arr_col) = (mv.arrow_row(), mv.arrow_col());

        self.cells[old_row as usize][old_col as usize] = Cell::Empty;
        if self.is_occupied(fin_row, fin_col) {
            self.cells[old_row as usize][old_col as usize] = Cell::Occupied;
            return Err(BoardError::SquareOccupied);
        }
        self.cells[fin_row as usize][fin_col as usize] = Cell::Occupied;
        self.amazons[colour.index()][index] = encode_square(fin_row, fin_col);

        if self.is_occupied(arr_row, arr_col) {
            // Roll back the relocation before reporting.
            self.cells[fin_row as usize][fin_col as usize] = Cell::Empty;
            self.cells[old_row as usize][old_col as usize] = Cell::Occupied;
            self.amazons[colour.index()][index] = packed;
            return Err(BoardError::SquareOccupied);
        }
        self.cells[arr_row as usize][arr_col as usize] = Cell::Occupied;

        Ok(UndoToken {
            mv,
            old_row,
            old_col,
        })
    }

    /// Roll back a move applied by [`Board::apply_move`]. Exact inverse.
    pub fn undo_move(&mut self, token: UndoToken) -> BoardResult<()> {
        let mv = token.mv;
        let colour = mv.colour();
        let index = mv.amazon_index();
        let expected = encode_square(mv.finish_row(), mv.finish_col());
        if self.amazons[colour.index()][index] != expected {
            return Err(BoardError::UndoMismatch);
        }

        // Clear the arrow first: it may sit on the vacated start square.
        self.cells[mv.arrow_row() as usize][mv.arrow_col() as usize] = Cell::Empty;
        self.cells[mv.finish_row() as usize][mv.finish_col() as usize] = Cell::Empty;
        self.cells[token.old_row as usize][token.old_col as usize] = Cell::Occupied;
        self.amazons[colour.index()][index] = encode_square(token.old_row, token.old_col);
        Ok(())
    }

    /// Apply `mv`, run `f`, and always unmake, including on error paths.
    /// Search recursion uses this so no cutoff can leave a move applied.
    pub fn with_move<T, E, F>(&mut self, mv: Move, f: F) -> Result<T, E>
    where
        E: From<BoardError>,
        F: FnOnce(&mut Board) -> Result<T, E>,
    {
        let token = self.apply_move(mv)?;
        let outcome = f(self);
        self.undo_move(token)?;
        outcome
    }

    /// The game is over when either side has no legal ply left.
    pub fn is_terminal(&self) -> bool {
        use crate::move_generation::move_generator::side_has_moves;
        !side_has_moves(self, Color::White) || !side_has_moves(self, Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::move_generator::generate_moves;

    #[test]
    fn starting_layout_matches_canonical_setup() {
        let board = Board::new_game();
        assert!(board.is_white(6, 0));
        assert!(board.is_white(9, 3));
        assert!(board.is_white(9, 6));
        assert!(board.is_white(6, 9));
        assert!(board.is_black(3, 0));
        assert!(board.is_black(0, 3));
        assert!(board.is_black(0, 6));
        assert!(board.is_black(3, 9));

        let occupied: usize = (0..10)
            .flat_map(|r| (0..10).map(move |c| (r, c)))
            .filter(|&(r, c)| board.is_occupied(r, c))
            .count();
        assert_eq!(occupied, 8);
        assert!(!board.is_terminal());
    }

    #[test]
    fn ray_validation_rejects_blocked_and_crooked_moves() {
        let board = Board::new_game();
        // Knight-shaped move.
        assert!(!board.is_valid_move(6, 0, 4, 1));
        // Blocked horizontally by the amazon on (6,9).
        assert!(board.is_valid_move(6, 0, 6, 8));
        assert!(!board.is_valid_move(6, 0, 6, 9));
        // Clear vertical ray, then one blocked by the amazon on (3,0).
        assert!(board.is_valid_move(6, 0, 4, 0));
        assert!(!board.is_valid_move(6, 0, 1, 0));
        // Zero-length move.
        assert!(!board.is_valid_move(5, 5, 5, 5));
        // Out of bounds.
        assert!(!board.is_valid_move(6, 0, 10, 0));
    }

    #[test]
    fn arrow_may_land_on_vacated_square() {
        let mut board = Board::new_game();
        // Amazon 0 sits on (6,0); move up one, shoot back onto (6,0).
        let mv = Move::new(Color::White, 0, 5, 0, 6, 0);
        let token = board.apply_move(mv).expect("move should apply");
        assert!(board.is_white(5, 0));
        assert!(board.is_arrow(6, 0));
        board.undo_move(token).expect("undo should succeed");
        assert!(board.is_white(6, 0));
        assert!(!board.is_occupied(5, 0));
    }

    #[test]
    fn apply_then_undo_restores_every_generated_move() {
        let mut board = Board::new_game();
        let reference = board.clone();
        let mut moves = generate_moves(&board, Color::White);
        while moves.has_next() {
            let index = moves.next_index();
            let mv = moves.get(index);
            let token = board.apply_move(mv).expect("generated move should apply");
            board.undo_move(token).expect("undo should succeed");
            assert_eq!(board, reference, "board diverged after {mv}");
        }
    }

    #[test]
    fn undo_mismatch_is_detected() {
        let mut board = Board::new_game();
        let mv = Move::new(Color::White, 0, 5, 0, 4, 0);
        let token = board.apply_move(mv).expect("move should apply");
        // Move the same amazon again behind the token's back.
        board
            .move_amazon(5, 0, 5, 5, Color::White)
            .expect("relocation should be legal");
        assert_eq!(board.undo_move(token), Err(BoardError::UndoMismatch));
    }

    #[test]
    fn with_move_unwinds_on_error() {
        let mut board = Board::new_game();
        let reference = board.clone();
        let mv = Move::new(Color::White, 0, 5, 0, 4, 0);
        let result: BoardResult<()> =
            board.with_move(mv, |_| Err(BoardError::InvalidRay));
        assert!(result.is_err());
        assert_eq!(board, reference);
    }

    #[test]
    fn walled_in_side_is_terminal() {
        let mut board = Board::new_game();
        // Wall every square adjacent to each white amazon with arrows.
        for index in 0..AMAZONS_PER_SIDE {
            let packed = board.amazon_position(Color::White, index);
            let (arow, acol) = (decode_row(packed) as i16, decode_col(packed) as i16);
            for dr in -1..=1i16 {
                for dc in -1..=1i16 {
                    let (r, c) = (arow + dr, acol + dc);
                    if (dr, dc) == (0, 0) || !(0..10).contains(&r) || !(0..10).contains(&c) {
                        continue;
                    }
                    board.cells[r as usize][c as usize] = Cell::Occupied;
                }
            }
        }
        assert!(board.is_terminal());
    }
}
