//! Uniform random engine.
//!
//! Picks any legal ply with equal probability. Useful as a baseline
//! opponent in harness matches and as a smoke test for move generation.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::amazons_types::Color;
use crate::game_state::board::Board;
use crate::move_generation::move_generator::generate_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new(seed: u64) -> Self {
        RandomEngine {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        _turn: u32,
        _params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let moves = generate_moves(board, side);
        let best_move = moves.as_slice().choose(&mut self.rng).copied();
        Ok(EngineOutput {
            best_move,
            info_lines: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::amazons_types::{decode_col, decode_row};

    #[test]
    fn random_move_is_legal_and_seed_deterministic() {
        let mut board = Board::new_game();
        let params = GoParams::default();

        let mut first = RandomEngine::new(11);
        let mut second = RandomEngine::new(11);
        let a = first
            .choose_move(&mut board, Color::Black, 1, &params)
            .expect("engine should run")
            .best_move
            .expect("start position has moves");
        let b = second
            .choose_move(&mut board, Color::Black, 1, &params)
            .expect("engine should run")
            .best_move
            .expect("start position has moves");
        assert_eq!(a, b);

        let packed = board.amazon_position(Color::Black, a.amazon_index());
        let (row_s, col_s) = (decode_row(packed), decode_col(packed));
        assert!(board.is_valid_move(row_s, col_s, a.finish_row(), a.finish_col()));
    }

    #[test]
    fn stuck_side_returns_no_move() {
        let white = [(0, 0), (0, 2), (2, 0), (2, 2)];
        let black = [(9, 9), (9, 7), (7, 9), (7, 7)];
        let mut arrows = Vec::new();
        for row in 0..4u8 {
            for col in 0..4u8 {
                if white.contains(&(row, col)) {
                    continue;
                }
                arrows.push((row, col));
            }
        }
        let mut board = Board::from_positions(white, black, &arrows).expect("layout");
        let mut engine = RandomEngine::new(0);
        let output = engine
            .choose_move(&mut board, Color::White, 5, &GoParams::default())
            .expect("engine should run");
        assert!(output.best_move.is_none());
    }
}
