//! Crate root module declarations for the Amazons engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, evaluation, and utility helpers) so binaries, tests, and
//! external tooling can import stable module paths.

pub mod game_state {
    pub mod amazons_types;
    pub mod board;
}

pub mod moves {
    pub mod move_codec;
    pub mod move_list;
}

pub mod move_generation {
    pub mod move_generator;
}

pub mod search {
    pub mod killer_table;
    pub mod negascout;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod eval {
    pub mod evaluator;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_search;
    pub mod engine_trait;
}

pub mod utils {
    pub mod match_harness;
    pub mod render_board;
}
