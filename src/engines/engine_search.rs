//! NegaScout-backed engine.
//!
//! Thin adapter that owns a search session, maps per-ply parameters onto a
//! deadline, and reports search statistics as info lines.

use std::time::{Duration, Instant};

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::eval::evaluator::{Evaluator, MobilityEvaluator};
use crate::game_state::amazons_types::Color;
use crate::game_state::board::Board;
use crate::move_generation::move_generator::generate_moves;
use crate::search::negascout::{NegaScout, SearchOptions};

pub struct SearchEngine<E: Evaluator> {
    session: NegaScout<E>,
    default_depth: u8,
}

impl SearchEngine<MobilityEvaluator> {
    /// Default engine: mobility evaluation with table and killers on.
    pub fn new_mobility() -> Self {
        Self::with_evaluator(MobilityEvaluator, SearchOptions::default())
    }
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn with_evaluator(evaluator: E, options: SearchOptions) -> Self {
        let default_depth = options.max_depth;
        SearchEngine {
            session: NegaScout::new(evaluator, options),
            default_depth,
        }
    }
}

impl<E: Evaluator + Send> Engine for SearchEngine<E> {
    fn name(&self) -> &str {
        "negascout"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        turn: u32,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let deadline = Instant::now() + Duration::from_millis(params.movetime_ms.max(1));
        self.session
            .set_max_depth(params.depth.unwrap_or(self.default_depth));

        let outcome = self
            .session
            .choose_move(board, side, turn, deadline)
            .map_err(|e| e.to_string())?;

        // No depth finished inside the budget. A `None` here would read as
        // "no legal ply" downstream, so answer with any legal move instead
        // of conceding a playable position.
        let best_move = match outcome.best_move {
            Some(mv) => Some(mv),
            None => generate_moves(board, side).as_slice().first().copied(),
        };

        Ok(EngineOutput {
            best_move,
            info_lines: vec![format!(
                "depth {} score {} nodes {}",
                outcome.depth_completed, outcome.best_score, outcome.nodes
            )],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_a_move_and_info_from_the_start() {
        let mut board = Board::new_game();
        let mut engine = SearchEngine::new_mobility();
        let params = GoParams {
            movetime_ms: 2_000,
            depth: Some(1),
        };
        let output = engine
            .choose_move(&mut board, Color::White, 1, &params)
            .expect("engine should run");
        assert!(output.best_move.is_some());
        assert_eq!(output.info_lines.len(), 1);
        assert!(output.info_lines[0].starts_with("depth 1"));
    }

    #[test]
    fn zero_time_budget_still_returns_a_legal_move() {
        use crate::game_state::amazons_types::{decode_col, decode_row};

        // Whether or not depth 1 squeezes in, a playable position must
        // never come back move-less.
        let mut board = Board::new_game();
        let mut engine = SearchEngine::new_mobility();
        let params = GoParams {
            movetime_ms: 0,
            depth: None,
        };
        let output = engine
            .choose_move(&mut board, Color::White, 1, &params)
            .expect("engine should run");
        let mv = output.best_move.expect("a legal move exists at the start");
        let packed = board.amazon_position(Color::White, mv.amazon_index());
        let (row_s, col_s) = (decode_row(packed), decode_col(packed));
        assert!(board.is_valid_move(row_s, col_s, mv.finish_row(), mv.finish_col()));
    }
}
