//! Benchmark suite for vocab-algo
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vocab_algo::{default_state, estimated_intervals, extract, extract_pages, next_state, UserRating};

const PAGE: &str = "\
Woord - Betekenis
1. de hond - le chien
2. de kat = le chat
3. de vogel: l'oiseau
4. de vis\tle poisson
5. het paard    le cheval
6. aujourd'hui - vandaag
@@ ### $$$ %%% &&&&
7. de koe | la vache";

fn bench_next_state(c: &mut Criterion) {
    let now = Utc::now();
    let state = default_state(now);
    c.bench_function("next_state", |b| {
        b.iter(|| next_state(black_box(&state), UserRating::Good, now))
    });
    c.bench_function("estimated_intervals", |b| {
        b.iter(|| estimated_intervals(black_box(&state), now))
    });
}

fn bench_extract(c: &mut Criterion) {
    c.bench_function("extract/page", |b| b.iter(|| extract(black_box(PAGE))));

    let pages: Vec<String> = (0..32).map(|_| PAGE.to_string()).collect();
    c.bench_function("extract_pages/32", |b| {
        b.iter(|| extract_pages(black_box(&pages)))
    });
}

criterion_group!(benches, bench_next_state, bench_extract);
criterion_main!(benches);
