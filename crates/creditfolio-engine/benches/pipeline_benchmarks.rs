//! Benchmarks for the synchronous analytics stages.
//!
//! Run with: cargo bench -p creditfolio-engine

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use creditfolio_analytics::{compute_correlation_matrix, PriceSeries};
use creditfolio_core::{CreditRating, Date, RatingScale, Ticker};
use creditfolio_engine::{AnalyticsEngine, FetchOutcome, FetchReport};
use creditfolio_portfolio::{BondPosition, CdsPosition, ReferenceData};
use creditfolio_traits::{EmptyPriceHistorySource, Fundamentals};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn ticker(i: usize) -> Ticker {
    Ticker::new(format!("T{i:04}"))
}

fn create_series(i: usize, days: usize) -> PriceSeries {
    let start = Date::from_ymd(2023, 1, 2).unwrap();
    let closes: Vec<f64> = (0..days)
        .map(|d| 100.0 + ((d * (i + 3)) % 17) as f64 - 8.0 + d as f64 * 0.01)
        .collect();
    PriceSeries::from_closes(ticker(i), start, &closes)
}

fn create_reference(size: usize) -> ReferenceData {
    let scale = RatingScale::standard();
    let ratings = [
        CreditRating::AA,
        CreditRating::A,
        CreditRating::BBBPlus,
        CreditRating::BB,
        CreditRating::B,
    ];
    let bonds = (0..size).map(|i| {
        BondPosition::builder()
            .ticker(ticker(i))
            .sector(format!("Sector {}", i % 7))
            .position_size(Decimal::from(1_000_000 + (i as i64) * 10_000))
            .coupon(3.0 + (i % 5) as f64)
            .maturity(Date::from_ymd(2026 + (i % 25) as i32, 6, 15).unwrap())
            .rating(ratings[i % ratings.len()])
            .current_price(Decimal::from(95 + (i % 10) as i64))
            .build(&scale)
            .unwrap()
    });
    let cds = (0..size / 2).map(|i| {
        CdsPosition::builder()
            .ticker(ticker(i))
            .notional(Decimal::from(5_000_000))
            .spread_bps(100.0 + i as f64)
            .recovery_rate(0.4)
            .contract_date(Date::from_ymd(2024, 3, 20).unwrap())
            .build()
            .unwrap()
    });

    ReferenceData::builder()
        .valuation_date(Date::from_ymd(2025, 1, 17).unwrap())
        .add_bonds(bonds)
        .add_cds_positions(cds)
        .build()
        .unwrap()
}

fn create_fetch(size: usize, days: usize) -> FetchReport {
    let mut report = FetchReport::new();
    for i in 0..size {
        report.record(
            ticker(i),
            FetchOutcome::Loaded {
                series: create_series(i, days),
                fundamentals: Fundamentals::with_market_cap(1.0e9),
            },
        );
    }
    report
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation_matrix");
    group.sample_size(30);

    for size in [10, 25, 50].iter() {
        let fetch = create_fetch(*size, 500);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &fetch, |b, fetch| {
            b.iter(|| compute_correlation_matrix(black_box(&fetch.series)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let engine = AnalyticsEngine::builder()
        .with_source(Arc::new(EmptyPriceHistorySource))
        .build()
        .unwrap();

    let mut group = c.benchmark_group("analyze");
    group.sample_size(30);

    for size in [15, 100, 250].iter() {
        let reference = create_reference(*size);
        let fetch = create_fetch(*size, 300);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(reference, fetch),
            |b, (reference, fetch)| {
                b.iter(|| engine.analyze(black_box(reference), fetch.clone()))
            },
        );
    }
    group.finish();
}

criterion_group!(pipeline, bench_correlation, bench_analyze);

criterion_main!(pipeline);
