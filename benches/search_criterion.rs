use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use amazons_engine::eval::evaluator::MobilityEvaluator;
use amazons_engine::game_state::amazons_types::Color;
use amazons_engine::game_state::board::Board;
use amazons_engine::search::negascout::{NegaScout, SearchOptions};

fn fixed_depth_options(table: bool) -> SearchOptions {
    SearchOptions {
        max_depth: 2,
        table_entries: 1 << 16,
        use_table: table,
        use_killers: true,
    }
}

fn bench_search_startpos(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_startpos");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(8));
    group.sample_size(10);

    for table in [false, true] {
        let label = if table { "with_table" } else { "no_table" };
        group.bench_with_input(BenchmarkId::new("depth2", label), &table, |b, &table| {
            b.iter(|| {
                let mut board = Board::new_game();
                let mut session =
                    NegaScout::new(MobilityEvaluator, fixed_depth_options(table));
                let deadline = Instant::now() + Duration::from_secs(3600);
                let outcome = session
                    .choose_move(black_box(&mut board), Color::White, 1, deadline)
                    .expect("search should run");
                assert_eq!(outcome.depth_completed, 2);
                black_box(outcome.nodes)
            });
        });
    }

    group.finish();
}

criterion_group!(search_benches, bench_search_startpos);
criterion_main!(search_benches);
