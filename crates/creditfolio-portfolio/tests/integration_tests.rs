//! Integration tests for creditfolio-portfolio.
//!
//! Exercises the full reference-data workflow on a realistic book.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use creditfolio_analytics::{compute_security_metrics, MetricsConfig, PriceSeries};
use creditfolio_core::{CreditRating, Date, RatingScale, Ticker};
use creditfolio_portfolio::prelude::*;
use creditfolio_portfolio::MetricsByTicker;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn valuation() -> Date {
    Date::from_ymd(2025, 1, 17).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn bond(
    ticker: &str,
    company: &str,
    sector: &str,
    size: Decimal,
    coupon: f64,
    maturity: (i32, u32, u32),
    rating: &str,
    price: Decimal,
) -> BondPosition {
    BondPosition::builder()
        .ticker(ticker)
        .company(company)
        .sector(sector)
        .position_size(size)
        .coupon(coupon)
        .maturity(Date::from_ymd(maturity.0, maturity.1, maturity.2).unwrap())
        .rating(rating.parse::<CreditRating>().unwrap())
        .current_price(price)
        .build(&RatingScale::standard())
        .unwrap()
}

fn cds(ticker: &str, spread: f64, recovery: f64) -> CdsPosition {
    CdsPosition::builder()
        .ticker(ticker)
        .notional(dec!(5_000_000))
        .tenor(5.0)
        .spread_bps(spread)
        .recovery_rate(recovery)
        .contract_date(valuation())
        .build()
        .unwrap()
}

fn book() -> ReferenceData {
    let m5 = dec!(5_000_000);
    ReferenceData::builder()
        .valuation_date(valuation())
        .risk_free_rate(0.0425)
        .add_bonds([
            bond("TSLA", "Tesla Inc", "Tech/TMT", m5, 5.30, (2028, 8, 15), "BB+", dec!(98.5)),
            bond("NFLX", "Netflix Inc", "Tech/TMT", m5, 5.875, (2029, 11, 15), "BB+", dec!(99.2)),
            bond("T", "AT&T Inc", "Tech/TMT", m5, 4.75, (2030, 5, 15), "BBB", dec!(97.8)),
            bond("XOM", "Exxon Mobil Corp", "Energy", m5, 4.23, (2029, 3, 19), "AA-", dec!(101.2)),
            bond("CVX", "Chevron Corp", "Energy", m5, 4.95, (2028, 5, 16), "AA-", dec!(100.8)),
            bond("OXY", "Occidental Petroleum", "Energy", m5, 6.125, (2027, 1, 1), "BBB-", dec!(99.5)),
            bond("BAC", "Bank of America Corp", "Financial", m5, 5.015, (2029, 7, 22), "A-", dec!(99.8)),
            bond("C", "Citigroup Inc", "Financial", m5, 5.316, (2028, 3, 26), "BBB+", dec!(99.3)),
            bond("GS", "Goldman Sachs Group", "Financial", m5, 4.75, (2030, 10, 21), "A-", dec!(98.9)),
            bond("BA", "Boeing Co", "Industrial", m5, 5.705, (2028, 5, 1), "BBB-", dec!(97.2)),
            bond("F", "Ford Motor Co", "Industrial", m5, 7.40, (2027, 11, 1), "BB+", dec!(98.8)),
            bond("AAL", "American Airlines", "Industrial", m5, 8.50, (2026, 5, 1), "B", dec!(96.5)),
            bond("M", "Macy's Inc", "Retail", dec!(4_000_000), 6.70, (2027, 7, 15), "BB-", dec!(95.8)),
            bond("CCL", "Carnival Corp", "Retail", dec!(3_000_000), 9.875, (2028, 8, 1), "B-", dec!(97.3)),
            bond("MGM", "MGM Resorts", "Retail", dec!(3_000_000), 6.75, (2027, 5, 1), "BB-", dec!(98.1)),
        ])
        .add_cds_positions([
            cds("TSLA", 280.0, 0.40),
            cds("NFLX", 220.0, 0.40),
            cds("AAL", 450.0, 0.35),
            cds("F", 320.0, 0.40),
            cds("M", 380.0, 0.35),
            cds("OXY", 240.0, 0.40),
        ])
        .build()
        .unwrap()
}

fn metrics_for(tickers: &[&str]) -> MetricsByTicker {
    let start = Date::from_ymd(2024, 1, 2).unwrap();
    tickers
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let closes: Vec<f64> = (0..30)
                .map(|k| 50.0 + (i as f64) + f64::from(k % 4))
                .collect();
            let series = PriceSeries::from_closes(Ticker::from(*t), start, &closes);
            (
                Ticker::from(*t),
                compute_security_metrics(&series, &MetricsConfig::default()),
            )
        })
        .collect::<BTreeMap<_, _>>()
}

// =============================================================================
// AGGREGATES
// =============================================================================

#[test]
fn test_book_aggregates() {
    let reference = book();
    let scale = RatingScale::standard();
    let agg = compute_portfolio_aggregates(
        reference.bonds(),
        reference.cds(),
        reference.valuation_date(),
        &scale,
    )
    .unwrap();

    assert_eq!(agg.num_bonds, 15);
    assert_eq!(agg.num_cds, 6);
    assert_eq!(agg.total_bond_value, dec!(70_000_000));
    assert_eq!(agg.total_cds_notional, dec!(30_000_000));

    // Weighted averages stay within the range of their inputs
    let coupons: Vec<f64> = reference.bonds().iter().map(|b| b.coupon).collect();
    let min = coupons.iter().copied().fold(f64::INFINITY, f64::min);
    let max = coupons.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(agg.weighted_avg_coupon > min && agg.weighted_avg_coupon < max);

    // Σ score × size / Σ size, by hand
    let expected_rating = (7.0 * 5.0 * 3.0 // TSLA NFLX F
        + 10.0 * 5.0 * 2.0 // T C
        + 13.0 * 5.0 * 2.0 // XOM CVX
        + 9.0 * 5.0 * 2.0 // OXY BA
        + 11.0 * 5.0 * 2.0 // BAC GS
        + 5.0 * 5.0 // AAL
        + 6.0 * 4.0 // M
        + 4.0 * 3.0 // CCL
        + 6.0 * 3.0) // MGM
        / 70.0;
    assert_relative_eq!(agg.weighted_avg_rating, expected_rating, epsilon = 1e-9);
    assert_eq!(
        agg.weighted_avg_rating_letter,
        scale.letter_for(expected_rating, 0.5)
    );
}

// =============================================================================
// SUMMARY AND BUCKETING
// =============================================================================

#[test]
fn test_book_summary() {
    let summary = PortfolioSummary::calculate(&book(), &RatingScale::standard());

    assert_eq!(summary.total_exposure, dec!(100_000_000));
    assert_eq!(summary.by_sector.len(), 5);
    assert_eq!(summary.by_sector["Retail"].value, dec!(10_000_000));
    assert_eq!(summary.by_sector["Tech/TMT"].count, 3);
    assert_relative_eq!(summary.avg_cds_spread_bps.unwrap(), 315.0);

    let first_rating = summary.by_rating.keys().next().copied();
    assert_eq!(first_rating, Some(CreditRating::AAMinus));
}

#[test]
fn test_book_maturity_profile() {
    let reference = book();
    let dist = bucket_by_maturity(reference.bonds(), reference.valuation_date());

    let total: f64 = dist.by_bucket.values().map(|e| e.weight_pct).sum();
    assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    assert_eq!(dist.total_bond_value, dec!(70_000_000));
    // Nothing in the book runs past 2030
    assert!(dist.get(MaturityBucket::SevenToTen).is_none());
}

#[test]
fn test_highest_risk_names() {
    let reference = book();
    let top: Vec<&str> = highest_risk_cds(reference.cds(), 3)
        .into_iter()
        .map(|c| c.ticker.as_str())
        .collect();
    assert_eq!(top, vec!["AAL", "M", "F"]);
}

// =============================================================================
// ENRICHMENT
// =============================================================================

#[test]
fn test_enrichment_with_partial_metrics() {
    let reference = book();
    // Only a few issuers have price history
    let metrics = metrics_for(&["TSLA", "XOM", "M"]);

    let bonds = enrich_bonds(reference.bonds(), &metrics, reference.valuation_date());
    assert_eq!(bonds.len(), 15);

    let with_metrics = bonds.iter().filter(|r| r.volatility.is_some()).count();
    assert_eq!(with_metrics, 3);

    let tsla = bonds.iter().find(|r| r.ticker.as_str() == "TSLA").unwrap();
    assert_eq!(tsla.market_value, dec!(4_925_000));
    assert!(tsla.stock_price.is_some());

    let gs = bonds.iter().find(|r| r.ticker.as_str() == "GS").unwrap();
    assert_eq!(gs.stock_price, None);
    assert_eq!(gs.company, "Goldman Sachs Group");
    assert_eq!(gs.rating, CreditRating::AMinus);

    let cds = enrich_cds(reference.cds(), &metrics);
    assert_eq!(cds.len(), 6);
    assert_eq!(cds.iter().filter(|r| r.stock_price.is_some()).count(), 2);
}

#[test]
fn test_enriched_record_serialization() {
    let reference = book();
    let bonds = enrich_bonds(
        &reference.bonds()[..1],
        &BTreeMap::new(),
        reference.valuation_date(),
    );
    let json = serde_json::to_value(&bonds[0]).unwrap();
    assert_eq!(json["ticker"], "TSLA");
    assert_eq!(json["rating"], "BB+");
    assert_eq!(json["maturity"], "2028-08-15");
    assert!(json["volatility"].is_null());
    assert!(json["stock_price"].is_null());
}
