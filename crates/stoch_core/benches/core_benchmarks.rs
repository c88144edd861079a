//! Criterion benchmarks for stoch_core special functions and root finding.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stoch_core::math::solvers::{BrentSolver, SolverConfig};
use stoch_core::math::special::{erfc, gamma_p, ln_gamma, std_normal_inv_cdf};

/// Benchmark erfc across the series and continued-fraction regions.
fn bench_erfc(c: &mut Criterion) {
    let mut group = c.benchmark_group("erfc");

    for x in [0.5, 2.0, 3.0, 6.0] {
        group.bench_with_input(BenchmarkId::from_parameter(x), &x, |b, &x| {
            b.iter(|| erfc(black_box(x)));
        });
    }

    group.finish();
}

/// Benchmark the normal quantile in the central and tail regions.
fn bench_normal_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("std_normal_inv_cdf");

    for p in [1e-12, 0.01, 0.3, 0.975] {
        group.bench_with_input(BenchmarkId::from_parameter(p), &p, |b, &p| {
            b.iter(|| std_normal_inv_cdf(black_box(p)));
        });
    }

    group.finish();
}

/// Benchmark log-gamma and the regularised incomplete gamma function.
fn bench_gamma(c: &mut Criterion) {
    c.bench_function("ln_gamma", |b| b.iter(|| ln_gamma(black_box(7.5))));

    let mut group = c.benchmark_group("gamma_p");
    for a in [0.5, 5.0, 100.0] {
        group.bench_with_input(BenchmarkId::from_parameter(a), &a, |b, &a| {
            b.iter(|| gamma_p(black_box(a), black_box(a * 1.1)));
        });
    }
    group.finish();
}

/// Benchmark Brent root finding on a smooth scalar equation.
fn bench_brent(c: &mut Criterion) {
    let solver = BrentSolver::new(SolverConfig::<f64>::high_precision());
    c.bench_function("brent_x_minus_cos", |b| {
        b.iter(|| solver.find_root(|x| x - x.cos(), black_box(0.0), black_box(1.0)))
    });
}

criterion_group!(
    benches,
    bench_erfc,
    bench_normal_quantile,
    bench_gamma,
    bench_brent
);
criterion_main!(benches);
