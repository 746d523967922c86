//! Standalone engine-vs-engine series runner.
//!
//! Run with:
//! `cargo run --release --bin engine_match`
//! `cargo run --release --bin engine_match -- --games 10 --movetime 1000`

use amazons_engine::engines::engine_random::RandomEngine;
use amazons_engine::engines::engine_search::SearchEngine;
use amazons_engine::engines::engine_trait::{Engine, GoParams};
use amazons_engine::utils::match_harness::{play_match_series, MatchConfig, SeriesConfig};

struct Args {
    games: u32,
    movetime_ms: u64,
    depth: Option<u8>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        games: 2,
        movetime_ms: 1_000,
        depth: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = |name: &str| {
            iter.next()
                .ok_or_else(|| format!("{name} requires a value"))
        };
        match flag.as_str() {
            "--games" => {
                args.games = value("--games")?
                    .parse()
                    .map_err(|e| format!("--games: {e}"))?;
            }
            "--movetime" => {
                args.movetime_ms = value("--movetime")?
                    .parse()
                    .map_err(|e| format!("--movetime: {e}"))?;
            }
            "--depth" => {
                args.depth = Some(
                    value("--depth")?
                        .parse()
                        .map_err(|e| format!("--depth: {e}"))?,
                );
            }
            other => return Err(format!("unknown flag: {other}")),
        }
    }
    Ok(args)
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = parse_args()?;

    let go_params = GoParams {
        movetime_ms: args.movetime_ms,
        depth: args.depth,
    };

    let config = SeriesConfig {
        games: args.games,
        per_game: MatchConfig {
            go_params,
            ..MatchConfig::default()
        },
    };

    println!(
        "[{}] starting {}-game series, {} ms per move",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        config.games,
        args.movetime_ms
    );

    let mut seed = 1234u64;
    let stats = play_match_series(
        || Box::new(SearchEngine::new_mobility()) as Box<dyn Engine>,
        || {
            seed += 1;
            Box::new(RandomEngine::new(seed)) as Box<dyn Engine>
        },
        &config,
    )?;

    println!(
        "[{}] {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        stats.report()
    );
    Ok(())
}
