//! Security identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Security identifier (exchange ticker of the issuer).
///
/// Bonds, CDS contracts, price histories and metrics are all joined on this key.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker without validation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a ticker, trimming whitespace and rejecting empty input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTicker` for empty or whitespace-containing text.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_ticker(s, "empty identifier"));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(CoreError::invalid_ticker(s, "contains whitespace"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
