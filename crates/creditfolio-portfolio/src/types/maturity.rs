//! Maturity buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining-life buckets used for the maturity profile.
///
/// Upper bounds are inclusive: exactly 3.0 years falls in `1-3Y`.
/// Matured bonds (zero or negative years) fall in `0-1Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MaturityBucket {
    /// Up to 1 year
    #[serde(rename = "0-1Y")]
    ZeroToOne,
    /// 1 to 3 years
    #[serde(rename = "1-3Y")]
    OneToThree,
    /// 3 to 5 years
    #[serde(rename = "3-5Y")]
    ThreeToFive,
    /// 5 to 7 years
    #[serde(rename = "5-7Y")]
    FiveToSeven,
    /// 7 to 10 years
    #[serde(rename = "7-10Y")]
    SevenToTen,
    /// 10 to 20 years
    #[serde(rename = "10-20Y")]
    TenToTwenty,
    /// 20 to 30 years
    #[serde(rename = "20-30Y")]
    TwentyToThirty,
    /// Over 30 years
    #[serde(rename = "30Y+")]
    ThirtyPlus,
}

impl MaturityBucket {
    /// Every bucket, shortest first.
    pub const ALL: [MaturityBucket; 8] = [
        Self::ZeroToOne,
        Self::OneToThree,
        Self::ThreeToFive,
        Self::FiveToSeven,
        Self::SevenToTen,
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::ThirtyPlus,
    ];

    /// Classifies a remaining life in years.
    #[must_use]
    pub fn from_years(years: f64) -> Self {
        const UPPER: [(f64, MaturityBucket); 7] = [
            (1.0, MaturityBucket::ZeroToOne),
            (3.0, MaturityBucket::OneToThree),
            (5.0, MaturityBucket::ThreeToFive),
            (7.0, MaturityBucket::FiveToSeven),
            (10.0, MaturityBucket::SevenToTen),
            (20.0, MaturityBucket::TenToTwenty),
            (30.0, MaturityBucket::TwentyToThirty),
        ];
        UPPER
            .iter()
            .find(|(bound, _)| years <= *bound)
            .map_or(Self::ThirtyPlus, |(_, bucket)| *bucket)
    }

    /// Display label, e.g. "3-5Y".
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1Y",
            Self::OneToThree => "1-3Y",
            Self::ThreeToFive => "3-5Y",
            Self::FiveToSeven => "5-7Y",
            Self::SevenToTen => "7-10Y",
            Self::TenToTwenty => "10-20Y",
            Self::TwentyToThirty => "20-30Y",
            Self::ThirtyPlus => "30Y+",
        }
    }
}

impl fmt::Display for MaturityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
