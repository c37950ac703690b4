use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use polyglot_oracle::resolve_symbol;
use std::hint::black_box;

fn resolve_benchmark(c: &mut Criterion) {
    let watchlist: Vec<String> = ["BTC", "ETH", "BNB", "SOL", "MATIC"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let questions = [
        "precio de solana",
        "how is ethereum doing today",
        "binance or polygon",
        "weather in Paris",
    ];

    let mut group = c.benchmark_group("resolve_symbol");
    for question in questions {
        group.bench_with_input(BenchmarkId::from_parameter(question), question, |b, q| {
            b.iter(|| resolve_symbol(black_box(q), black_box(&watchlist)));
        });
    }
    group.finish();
}

criterion_group!(benches, resolve_benchmark);
criterion_main!(benches);
