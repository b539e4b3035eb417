//! Benchmarks for AMM math calculations

use cosmoarb_amm::{cpmm, optimal_input, stable::StablePool};
use cosmoarb_decimal::{Decimal, Precision};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn benchmark_cpmm_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpmm_forward");
    let fee = Decimal::from_str_exact("0.003").unwrap();

    for (name, amount) in [("small", 1_000u128), ("medium", 100_000), ("large", 10_000_000)] {
        group.bench_with_input(BenchmarkId::new("simulate_forward", name), &amount, |b, &amount_in| {
            b.iter(|| {
                cpmm::simulate_forward(
                    black_box(1_000_000_000),
                    black_box(2_000_000_000),
                    black_box(&fee),
                    black_box(amount_in),
                    black_box(Precision::new(20)),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_stable_invariant_construction(c: &mut Criterion) {
    c.bench_function("stable_pool_new", |b| {
        b.iter(|| {
            StablePool::new(
                black_box(Decimal::from_i64(1_000_000)),
                black_box(Decimal::from_i64(1_050_000)),
                black_box(18),
                black_box(18),
                black_box(Decimal::one()),
                black_box(Decimal::from_str_exact("0.0001").unwrap()),
                black_box(Decimal::from_i64(4)),
                black_box(Decimal::from_i64(4)),
                black_box(Decimal::from_i64(1)),
                black_box(Decimal::from_i64(1)),
                black_box(Decimal::from_str_exact("5").unwrap()),
                black_box(Decimal::from_str_exact("0.0015").unwrap()),
                black_box(Decimal::from_str_exact("0.0005").unwrap()),
                black_box(Precision::new(30)),
            )
        });
    });
}

fn benchmark_stable_swap_simulation(c: &mut Criterion) {
    let pool = StablePool::new(
        Decimal::from_i64(1_000_000),
        Decimal::from_i64(1_000_000),
        18,
        18,
        Decimal::one(),
        Decimal::from_str_exact("0.0001").unwrap(),
        Decimal::from_i64(4),
        Decimal::from_i64(4),
        Decimal::from_i64(1),
        Decimal::from_i64(1),
        Decimal::from_str_exact("5").unwrap(),
        Decimal::from_str_exact("0.0015").unwrap(),
        Decimal::from_str_exact("0.0005").unwrap(),
        Precision::new(30),
    )
    .unwrap();

    c.bench_function("stable_simulate_token0_for_token1", |b| {
        b.iter(|| pool.simulate_token0_for_token1(black_box(&Decimal::from_i64(1000))));
    });
}

fn benchmark_optimal_borrow(c: &mut Criterion) {
    let fee = Decimal::from_str_exact("0.003").unwrap();
    c.bench_function("solve_optimal_borrow", |b| {
        b.iter(|| {
            optimal_input::solve_optimal_borrow(
                black_box(1_000_000),
                black_box(1_000_000),
                black_box(1_000_000),
                black_box(1_050_000),
                black_box(1_000_000),
                black_box(1_050_000),
                black_box(&fee),
                black_box(&fee),
                black_box(&fee),
                black_box(Precision::new(25)),
            )
        });
    });
}

criterion_group!(
    benches,
    benchmark_cpmm_forward,
    benchmark_stable_invariant_construction,
    benchmark_stable_swap_simulation,
    benchmark_optimal_borrow,
);
criterion_main!(benches);
