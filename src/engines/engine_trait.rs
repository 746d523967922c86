//! Engine abstraction layer.
//!
//! Defines common input parameters and output payloads so different move
//! selection strategies can be swapped behind a single trait interface by
//! harnesses and clients.

use crate::game_state::amazons_types::Color;
use crate::game_state::board::Board;
use crate::moves::move_codec::Move;

#[derive(Debug, Clone)]
pub struct GoParams {
    /// Wall-clock budget for this ply.
    pub movetime_ms: u64,
    /// Optional depth cap below the engine's own ceiling.
    pub depth: Option<u8>,
}

impl Default for GoParams {
    fn default() -> Self {
        // 30 second turns with a safety margin for transport overhead.
        GoParams {
            movetime_ms: 28_000,
            depth: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` means the engine has no legal ply: it has lost.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn choose_move(
        &mut self,
        board: &mut Board,
        side: Color,
        turn: u32,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
