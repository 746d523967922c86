//! Position evaluation contract and a default mobility evaluator.
//!
//! The search only needs the contract: a deterministic score from the
//! mover's perspective that is zero-sum under side exchange, so negating a
//! child's score flips the perspective for the parent. Territory-style
//! flood-fill evaluators plug in through the same trait.

use crate::game_state::amazons_types::{Color, AMAZONS_PER_SIDE};
use crate::game_state::board::Board;
use crate::move_generation::move_generator::mobility;

/// Scoring contract consumed by the search.
///
/// Implementations must be deterministic for a fixed `(board, turn)` and
/// zero-sum under side flip:
/// `evaluate(b, White, t) == -evaluate(b, Black, t)`.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Color, turn: u32) -> i32;
}

/// Mobility-based evaluation: blends total mobility with the mobility of
/// each side's most constrained amazon. Early in the game open space
/// dominates; later the weakest amazon decides who runs out of plies
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityEvaluator;

impl MobilityEvaluator {
    const OPENING_TURNS: u32 = 30;

    fn side_mobility(board: &Board, side: Color) -> (i32, i32) {
        let mut total = 0i32;
        let mut minimum = i32::MAX;
        for index in 0..AMAZONS_PER_SIDE {
            let moves = mobility(board, board.amazon_position(side, index)) as i32;
            total += moves;
            minimum = minimum.min(moves);
        }
        (total, minimum)
    }
}

impl Evaluator for MobilityEvaluator {
    fn evaluate(&self, board: &Board, side: Color, turn: u32) -> i32 {
        let (white_total, white_min) = Self::side_mobility(board, Color::White);
        let (black_total, black_min) = Self::side_mobility(board, Color::Black);

        let white_advantage = if turn <= Self::OPENING_TURNS {
            3 * (white_total - black_total) + 2 * (white_min - black_min)
        } else {
            white_total - black_total
        };

        match side {
            Color::White => white_advantage,
            Color::Black => -white_advantage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_is_zero_sum_under_side_flip() {
        let mut board = Board::new_game();
        let evaluator = MobilityEvaluator;
        for turn in [1u32, 15, 31, 60] {
            assert_eq!(
                evaluator.evaluate(&board, Color::White, turn),
                -evaluator.evaluate(&board, Color::Black, turn)
            );
        }

        // Still holds on an asymmetric position.
        board
            .move_amazon(6, 0, 4, 2, Color::White)
            .expect("relocation should be legal");
        board.place_arrow(4, 2, 4, 8).expect("arrow should place");
        assert_eq!(
            evaluator.evaluate(&board, Color::White, 2),
            -evaluator.evaluate(&board, Color::Black, 2)
        );
    }

    #[test]
    fn starting_position_is_balanced() {
        let board = Board::new_game();
        let evaluator = MobilityEvaluator;
        assert_eq!(evaluator.evaluate(&board, Color::White, 1), 0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let board = Board::new_game();
        let evaluator = MobilityEvaluator;
        let first = evaluator.evaluate(&board, Color::Black, 10);
        assert_eq!(first, evaluator.evaluate(&board, Color::Black, 10));
    }
}
