use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use odi_terminal::dataset::{self, Dataset, PlayerRecord};
use odi_terminal::leaderboard::{self, RoleChoice};
use odi_terminal::player_detail;
use odi_terminal::query;

const ROLES: [&str; 3] = ["batter", "bowler", "allrounder"];

fn synthetic_dataset(rows: u32) -> Dataset {
    let records = (0..rows)
        .map(|idx| PlayerRecord {
            player_name: format!("Player {idx}"),
            role: ROLES[(idx % 3) as usize].to_string(),
            team: format!("Team {}", idx % 12),
            total_matches_played: 20 + idx % 400,
            total_runs: (idx * 37) % 18_000,
            strike_rate: 60.0 + f64::from(idx % 60),
            average: 10.0 + f64::from(idx % 50),
            total_balls_faced: (idx * 41) % 21_000,
            total_wickets_taken: (idx * 13) % 540,
            total_runs_conceded: (idx * 29) % 12_000,
            total_overs_bowled: f64::from(idx % 3_000),
            player_of_match_awards: idx % 60,
            matches_won: idx % 250,
            matches_lost: idx % 200,
            percentage: f64::from(idx % 100),
        })
        .collect();
    Dataset::from_rows(records)
}

fn bench_csv_load(c: &mut Criterion) {
    c.bench_function("csv_load", |b| {
        b.iter(|| {
            let ds = dataset::from_reader(black_box(SAMPLE_CSV.as_bytes())).unwrap();
            black_box(ds.len());
        })
    });
}

fn bench_queries(c: &mut Criterion) {
    let ds = synthetic_dataset(5_000);
    c.bench_function("query_most_runs", |b| {
        b.iter(|| {
            let result = query::handle_query(&ds, black_box("who has the most runs?"));
            black_box(result.is_handled());
        })
    });
    c.bench_function("query_top_bowlers", |b| {
        b.iter(|| {
            let result = query::handle_query(&ds, black_box("top bowlers"));
            black_box(result.is_handled());
        })
    });
    c.bench_function("query_all_rounders", |b| {
        b.iter(|| {
            let result = query::handle_query(&ds, black_box("allrounder"));
            black_box(result.is_handled());
        })
    });
}

fn bench_leaderboard(c: &mut Criterion) {
    let ds = synthetic_dataset(5_000);
    c.bench_function("leaderboard_all_rounders", |b| {
        b.iter(|| {
            let top = leaderboard::top_players(&ds, black_box(RoleChoice::AllRounder), 3);
            black_box(top.len());
        })
    });
    c.bench_function("player_picker_names", |b| {
        b.iter(|| {
            let names = leaderboard::unique_names_for_role(&ds, black_box(RoleChoice::Bowler));
            black_box(names.len());
        })
    });
}

fn bench_player_detail(c: &mut Criterion) {
    let ds = synthetic_dataset(5_000);
    let mut rng = StdRng::seed_from_u64(11);
    c.bench_function("player_detail_lookup", |b| {
        b.iter(|| {
            let detail =
                player_detail::get_player_detail(&ds, black_box("PLAYER 4999"), &mut rng).unwrap();
            black_box(detail.quote);
        })
    });
}

criterion_group!(
    perf,
    bench_csv_load,
    bench_queries,
    bench_leaderboard,
    bench_player_detail
);
criterion_main!(perf);

static SAMPLE_CSV: &str = include_str!("../data/odi_cricket_data.csv");
