//! Head-to-head engine match harness.
//!
//! Runs two [`Engine`] implementations against each other on one
//! authoritative board, without any transport layer. Amazons games cannot
//! draw: every ply plants an arrow, so one side runs out of moves within
//! 92 plies at the latest.

use std::time::Instant;

use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::amazons_types::Color;
use crate::game_state::board::Board;
use crate::moves::move_codec::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub go_params: GoParams,
    /// Safety stop; a legal game always ends on its own first.
    pub max_plies: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            go_params: GoParams::default(),
            max_plies: 92,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Colour that still had a move when the opponent ran out.
    pub winner: Color,
    pub plies: u32,
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub white_total_time_ns: u128,
    pub black_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct SeriesConfig {
    pub games: u32,
    pub per_game: MatchConfig,
}

#[derive(Debug, Clone, Default)]
pub struct SeriesStats {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub total_plies: u32,
}

impl SeriesStats {
    pub fn report(&self) -> String {
        format!(
            "player1 {} - {} player2 over {} plies",
            self.player1_wins, self.player2_wins, self.total_plies
        )
    }
}

/// Play one game; `white` moves first. Returns an error string when an
/// engine fails or produces an illegal move.
pub fn play_match<'a>(
    white: &'a mut (dyn Engine + 'a),
    black: &'a mut (dyn Engine + 'a),
    config: &MatchConfig,
) -> Result<MatchResult, String> {
    let mut board = Board::new_game();
    let mut moves = Vec::new();
    let mut times = [0u128; 2];
    let mut side = Color::White;
    let mut turn = 1u32;

    loop {
        let engine = match side {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };

        let started = Instant::now();
        let output = engine.choose_move(&mut board, side, turn, &config.go_params)?;
        times[side.index()] += started.elapsed().as_nanos();

        let Some(mv) = output.best_move else {
            // No legal ply: the side to move has lost.
            return Ok(MatchResult {
                winner: side.opposite(),
                plies: turn - 1,
                moves,
                final_board: board,
                white_total_time_ns: times[Color::White.index()],
                black_total_time_ns: times[Color::Black.index()],
            });
        };

        board
            .apply_move(mv)
            .map_err(|e| format!("{} played illegal move {mv}: {e}", engine.name()))?;
        moves.push(mv);

        if turn > config.max_plies {
            return Err(format!(
                "game exceeded {} plies without a result",
                config.max_plies
            ));
        }
        side = side.opposite();
        turn += 1;
    }
}

/// Play a series, alternating colours each game so neither engine keeps
/// the first-move advantage.
pub fn play_match_series<F1, F2>(
    mut player1: F1,
    mut player2: F2,
    config: &SeriesConfig,
) -> Result<SeriesStats, String>
where
    F1: FnMut() -> Box<dyn Engine>,
    F2: FnMut() -> Box<dyn Engine>,
{
    let mut stats = SeriesStats::default();

    for game in 0..config.games {
        let mut first = player1();
        let mut second = player2();
        let player1_is_white = game % 2 == 0;

        let result = if player1_is_white {
            play_match(first.as_mut(), second.as_mut(), &config.per_game)?
        } else {
            play_match(second.as_mut(), first.as_mut(), &config.per_game)?
        };

        let player1_won = (result.winner == Color::White) == player1_is_white;
        if player1_won {
            stats.player1_wins += 1;
        } else {
            stats.player2_wins += 1;
        }
        stats.total_plies += result.plies;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::engine_random::RandomEngine;

    #[test]
    fn random_vs_random_finishes_with_a_winner() {
        let mut white = RandomEngine::new(3);
        let mut black = RandomEngine::new(4);
        let result = play_match(&mut white, &mut black, &MatchConfig::default())
            .expect("match should finish");

        assert!(result.plies <= 92);
        assert_eq!(result.moves.len() as u32, result.plies);
        // The loser really is stuck on the final board.
        use crate::move_generation::move_generator::side_has_moves;
        assert!(!side_has_moves(&result.final_board, result.winner.opposite()));
    }

    #[test]
    fn series_alternates_and_counts_every_game() {
        let config = SeriesConfig {
            games: 4,
            per_game: MatchConfig::default(),
        };
        let mut seed = 100u64;
        let stats = play_match_series(
            || {
                seed += 1;
                Box::new(RandomEngine::new(seed)) as Box<dyn Engine>
            },
            || Box::new(RandomEngine::new(999)) as Box<dyn Engine>,
            &config,
        )
        .expect("series should finish");
        assert_eq!(stats.player1_wins + stats.player2_wins, 4);
        assert!(stats.total_plies > 0);
    }
}
