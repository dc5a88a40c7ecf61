//! History lookback periods.

use std::fmt;
use std::str::FromStr;

use creditfolio_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

/// How far back a price-history request reaches from its end date.
///
/// Written as `"<n>d"`, `"<n>m"` (or `"<n>mo"`), `"<n>y"` or `"max"`.
///
/// ```
/// use creditfolio_traits::LookbackPeriod;
///
/// let period: LookbackPeriod = "2y".parse().unwrap();
/// assert_eq!(period, LookbackPeriod::Years(2));
/// assert_eq!(period.to_string(), "2y");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookbackPeriod {
    /// Calendar days.
    Days(u32),
    /// Calendar months.
    Months(u32),
    /// Calendar years.
    Years(u32),
    /// Everything the source has.
    Max,
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        Self::Years(2)
    }
}

impl LookbackPeriod {
    /// First date inside the period ending at `end`, or `None` for no bound.
    ///
    /// Month and year steps use calendar arithmetic with day-of-month
    /// clamping. A period reaching outside the representable date range is
    /// treated as unbounded.
    #[must_use]
    pub fn start_from(&self, end: Date) -> Option<Date> {
        match *self {
            Self::Days(n) => end.checked_add_days(-i64::from(n)),
            Self::Months(n) => i32::try_from(n)
                .ok()
                .and_then(|n| end.add_months(-n).ok()),
            Self::Years(n) => i32::try_from(n)
                .ok()
                .and_then(|n| n.checked_mul(12))
                .and_then(|m| end.add_months(-m).ok()),
            Self::Max => None,
        }
    }

    /// Returns true if `date` lies inside the period ending at `end`.
    #[must_use]
    pub fn contains(&self, date: Date, end: Date) -> bool {
        date <= end && self.start_from(end).map_or(true, |start| date >= start)
    }
}

impl FromStr for LookbackPeriod {
    type Err = TraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        if text == "max" {
            return Ok(Self::Max);
        }

        let split = text
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid(s))?;
        let (digits, unit) = text.split_at(split);
        let n: u32 = digits.parse().map_err(|_| invalid(s))?;
        if n == 0 {
            return Err(invalid(s));
        }

        match unit {
            "d" => Ok(Self::Days(n)),
            "m" | "mo" => Ok(Self::Months(n)),
            "y" => Ok(Self::Years(n)),
            _ => Err(invalid(s)),
        }
    }
}

fn invalid(s: &str) -> TraitError {
    TraitError::InvalidInput(format!(
        "lookback period '{s}' (expected <n>d, <n>m, <n>y or max)"
    ))
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Days(n) => write!(f, "{n}d"),
            Self::Months(n) => write!(f, "{n}m"),
            Self::Years(n) => write!(f, "{n}y"),
            Self::Max => f.write_str("max"),
        }
    }
}

impl TryFrom<String> for LookbackPeriod {
    type Error = TraitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookbackPeriod> for String {
    fn from(value: LookbackPeriod) -> Self {
        value.to_string()
    }
}
