//! Credit rating letters and the numeric rating scale.
//!
//! - [`CreditRating`]: S&P-style letter grades, AAA (best) to D (default)
//! - [`RatingScale`]: ordered letter → score table, higher score = better credit
//!
//! The standard scale is not a linear transform of the letter grade. Some
//! modifiers share a score with the flat grade (AA+/AA = 14, BB+/BB = 7) while
//! minus grades usually step down (AA- = 13, A- = 11):
//!
//! | Letter | Score | Letter | Score | Letter | Score |
//! |--------|-------|--------|-------|--------|-------|
//! | AAA    | 15    | BBB+   | 10    | CCC+   | 3     |
//! | AA+    | 14    | BBB    | 10    | CCC    | 3     |
//! | AA     | 14    | BBB-   | 9     | CCC-   | 2     |
//! | AA-    | 13    | BB+    | 7     | CC     | 1     |
//! | A+     | 12    | BB     | 7     | C      | 1     |
//! | A      | 12    | BB-    | 6     | D      | 0     |
//! | A-     | 11    | B+     | 5     |        |       |
//! |        |       | B      | 5     |        |       |
//! |        |       | B-     | 4     |        |       |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Default tolerance for [`RatingScale::letter_for`].
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Placeholder returned when no scale entry is within tolerance.
pub const NOT_AVAILABLE: &str = "N/A";

/// S&P-style credit rating.
///
/// Ordering follows credit quality: `AAA < AAPlus < ... < D`, so the best
/// credit sorts first.
///
/// # Examples
///
/// ```
/// use creditfolio_core::CreditRating;
///
/// let rating: CreditRating = "BBB-".parse().unwrap();
/// assert_eq!(rating, CreditRating::BBBMinus);
/// assert!(rating.is_investment_grade());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreditRating {
    /// Highest quality
    AAA,
    /// AA+
    AAPlus,
    /// AA
    AA,
    /// AA-
    AAMinus,
    /// A+
    APlus,
    /// A
    A,
    /// A-
    AMinus,
    /// BBB+
    BBBPlus,
    /// BBB
    BBB,
    /// BBB- (lowest investment grade)
    BBBMinus,
    /// BB+ (highest high yield)
    BBPlus,
    /// BB
    BB,
    /// BB-
    BBMinus,
    /// B+
    BPlus,
    /// B
    B,
    /// B-
    BMinus,
    /// CCC+
    CCCPlus,
    /// CCC
    CCC,
    /// CCC-
    CCCMinus,
    /// CC
    CC,
    /// C
    C,
    /// Default
    D,
}

impl CreditRating {
    /// All ratings by descending credit quality.
    pub const ALL: [CreditRating; 22] = [
        Self::AAA,
        Self::AAPlus,
        Self::AA,
        Self::AAMinus,
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BBBPlus,
        Self::BBB,
        Self::BBBMinus,
        Self::BBPlus,
        Self::BB,
        Self::BBMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CCCPlus,
        Self::CCC,
        Self::CCCMinus,
        Self::CC,
        Self::C,
        Self::D,
    ];

    /// Returns true if this is investment grade (BBB- or better).
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        *self <= CreditRating::BBBMinus
    }

    /// Returns true if this is high yield (BB+ down to C).
    #[must_use]
    pub fn is_high_yield(&self) -> bool {
        *self >= CreditRating::BBPlus && *self <= CreditRating::C
    }

    /// Returns the S&P-style notation.
    #[must_use]
    pub fn notation(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AAPlus => "AA+",
            Self::AA => "AA",
            Self::AAMinus => "AA-",
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BBBPlus => "BBB+",
            Self::BBB => "BBB",
            Self::BBBMinus => "BBB-",
            Self::BBPlus => "BB+",
            Self::BB => "BB",
            Self::BBMinus => "BB-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CCCPlus => "CCC+",
            Self::CCC => "CCC",
            Self::CCCMinus => "CCC-",
            Self::CC => "CC",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Parses a rating from exact S&P notation ("BB+", "A-").
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.notation() == s)
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}

impl FromStr for CreditRating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| CoreError::unknown_rating(s))
    }
}

impl Serialize for CreditRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.notation())
    }
}

impl<'de> Deserialize<'de> for CreditRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// The standard letter → score table, by descending credit quality.
const STANDARD_SCALE: [(CreditRating, u8); 22] = [
    (CreditRating::AAA, 15),
    (CreditRating::AAPlus, 14),
    (CreditRating::AA, 14),
    (CreditRating::AAMinus, 13),
    (CreditRating::APlus, 12),
    (CreditRating::A, 12),
    (CreditRating::AMinus, 11),
    (CreditRating::BBBPlus, 10),
    (CreditRating::BBB, 10),
    (CreditRating::BBBMinus, 9),
    (CreditRating::BBPlus, 7),
    (CreditRating::BB, 7),
    (CreditRating::BBMinus, 6),
    (CreditRating::BPlus, 5),
    (CreditRating::B, 5),
    (CreditRating::BMinus, 4),
    (CreditRating::CCCPlus, 3),
    (CreditRating::CCC, 3),
    (CreditRating::CCCMinus, 2),
    (CreditRating::CC, 1),
    (CreditRating::C, 1),
    (CreditRating::D, 0),
];

/// Bidirectional mapping between rating letters and ordinal scores.
///
/// Entries are iterated in the order they were supplied; for the standard
/// scale that is descending credit quality, so reverse lookups resolve ties
/// to the better rating (a score of 14 renders as "AA+", not "AA").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingScale {
    entries: Vec<(CreditRating, u8)>,
}

impl RatingScale {
    /// The standard AAA=15 … D=0 scale.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_SCALE.to_vec(),
        }
    }

    /// Builds a scale from explicit entries. Iteration order is the given order.
    #[must_use]
    pub fn from_entries(entries: Vec<(CreditRating, u8)>) -> Self {
        Self { entries }
    }

    /// Returns the score for a rating letter.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownRating` if the letter is not recognised or
    /// has no entry in this scale.
    pub fn numeric_for(&self, letter: &str) -> CoreResult<u8> {
        let rating: CreditRating = letter.parse()?;
        self.score(rating)
            .ok_or_else(|| CoreError::unknown_rating(letter))
    }

    /// Returns the score for a parsed rating, if the scale contains it.
    #[must_use]
    pub fn score(&self, rating: CreditRating) -> Option<u8> {
        self.entries
            .iter()
            .find(|(r, _)| *r == rating)
            .map(|(_, score)| *score)
    }

    /// Returns the first entry whose score is strictly within `tolerance` of `numeric`.
    #[must_use]
    pub fn rating_for(&self, numeric: f64, tolerance: f64) -> Option<CreditRating> {
        self.entries
            .iter()
            .find(|(_, score)| (f64::from(*score) - numeric).abs() < tolerance)
            .map(|(rating, _)| *rating)
    }

    /// Renders a (usually averaged) score back to an approximate letter.
    ///
    /// Returns [`NOT_AVAILABLE`] when no entry is within tolerance, including
    /// for NaN input.
    #[must_use]
    pub fn letter_for(&self, numeric: f64, tolerance: f64) -> &'static str {
        self.rating_for(numeric, tolerance)
            .map_or(NOT_AVAILABLE, |r| r.notation())
    }

    /// Iterates over `(rating, score)` pairs in scale order.
    pub fn entries(&self) -> impl Iterator<Item = (CreditRating, u8)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the scale has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::standard()
    }
}
