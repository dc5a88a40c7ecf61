//! CDS book ranking.

use crate::types::CdsPosition;

/// The `n` widest-spread CDS positions, widest first.
///
/// Equal spreads keep their input order.
#[must_use]
pub fn highest_risk_cds(cds: &[CdsPosition], n: usize) -> Vec<&CdsPosition> {
    let mut ranked: Vec<&CdsPosition> = cds.iter().collect();
    ranked.sort_by(|a, b| b.spread_bps.total_cmp(&a.spread_bps));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use creditfolio_core::Date;
    use rust_decimal_macros::dec;

    fn cds(ticker: &str, spread: f64) -> CdsPosition {
        CdsPosition::builder()
            .ticker(ticker)
            .notional(dec!(5_000_000))
            .spread_bps(spread)
            .recovery_rate(0.4)
            .contract_date(Date::from_ymd(2025, 1, 17).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_top_three() {
        let book = vec![
            cds("TSLA", 280.0),
            cds("NFLX", 220.0),
            cds("AAL", 450.0),
            cds("F", 320.0),
            cds("M", 380.0),
            cds("OXY", 240.0),
        ];
        let top: Vec<&str> = highest_risk_cds(&book, 3)
            .iter()
            .map(|c| c.ticker.as_str())
            .collect();
        assert_eq!(top, vec!["AAL", "M", "F"]);
    }

    #[test]
    fn test_ties_keep_input_order_and_n_exceeds_len() {
        let book = vec![cds("A", 100.0), cds("B", 100.0)];
        let top: Vec<&str> = highest_risk_cds(&book, 10)
            .iter()
            .map(|c| c.ticker.as_str())
            .collect();
        assert_eq!(top, vec!["A", "B"]);
        assert!(highest_risk_cds(&book, 0).is_empty());
    }
}
