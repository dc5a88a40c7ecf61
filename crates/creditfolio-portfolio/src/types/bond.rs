//! Corporate bond positions.

use creditfolio_core::{CreditRating, Date, RatingScale, Ticker};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PortfolioError, PortfolioResult};

/// A fixed-coupon corporate bond holding.
///
/// Prices are quoted as a percent of par; the coupon is an annual rate in
/// percent (5.30 means 5.30%). `rating_numeric` always equals the score of
/// `rating` in the scale the position was built against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPosition {
    /// Issuer identifier.
    pub ticker: Ticker,

    /// Issuer name.
    pub company: String,

    /// Issuer sector.
    pub sector: String,

    /// Face amount held, in currency units.
    pub position_size: Decimal,

    /// Annual coupon rate in percent.
    pub coupon: f64,

    /// Maturity date.
    pub maturity: Date,

    /// Letter credit rating.
    pub rating: CreditRating,

    /// Ordinal score of `rating`.
    pub rating_numeric: u8,

    /// Price at issue, percent of par.
    pub issue_price: Decimal,

    /// Current market price, percent of par.
    pub current_price: Decimal,
}

impl BondPosition {
    /// Creates a new bond position builder.
    #[must_use]
    pub fn builder() -> BondPositionBuilder {
        BondPositionBuilder::new()
    }

    /// Market value: position size × current price / 100.
    #[must_use]
    pub fn market_value(&self) -> Decimal {
        self.position_size * self.current_price / Decimal::ONE_HUNDRED
    }

    /// Years from `valuation_date` to maturity (days / 365.25).
    ///
    /// Negative for a bond that has already matured.
    #[must_use]
    pub fn years_to_maturity(&self, valuation_date: Date) -> f64 {
        valuation_date.years_until(&self.maturity)
    }
}

/// Builder for [`BondPosition`].
#[derive(Debug, Clone, Default)]
pub struct BondPositionBuilder {
    ticker: Option<Ticker>,
    company: Option<String>,
    sector: Option<String>,
    position_size: Option<Decimal>,
    coupon: Option<f64>,
    maturity: Option<Date>,
    rating: Option<CreditRating>,
    rating_numeric: Option<u8>,
    issue_price: Option<Decimal>,
    current_price: Option<Decimal>,
}

impl BondPositionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issuer identifier.
    #[must_use]
    pub fn ticker(mut self, ticker: impl Into<Ticker>) -> Self {
        self.ticker = Some(ticker.into());
        self
    }

    /// Sets the issuer name.
    #[must_use]
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the face amount held.
    #[must_use]
    pub fn position_size(mut self, size: Decimal) -> Self {
        self.position_size = Some(size);
        self
    }

    /// Sets the annual coupon in percent.
    #[must_use]
    pub fn coupon(mut self, coupon: f64) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, maturity: Date) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the letter rating.
    #[must_use]
    pub fn rating(mut self, rating: CreditRating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Supplies a numeric rating to check against the scale.
    ///
    /// When omitted the score is taken from the scale.
    #[must_use]
    pub fn rating_numeric(mut self, numeric: u8) -> Self {
        self.rating_numeric = Some(numeric);
        self
    }

    /// Sets the issue price (defaults to par).
    #[must_use]
    pub fn issue_price(mut self, price: Decimal) -> Self {
        self.issue_price = Some(price);
        self
    }

    /// Sets the current market price.
    #[must_use]
    pub fn current_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Builds the position, deriving and checking the numeric rating.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the position size is
    /// not positive, a price is negative, the coupon is not a finite
    /// non-negative number, the rating is not in `scale`, or a supplied
    /// numeric rating disagrees with the scale.
    pub fn build(self, scale: &RatingScale) -> PortfolioResult<BondPosition> {
        let ticker = self
            .ticker
            .ok_or_else(|| PortfolioError::missing_field("ticker"))?;
        let id = ticker.as_str();

        let position_size = self
            .position_size
            .ok_or_else(|| PortfolioError::missing_field("position_size"))?;
        let coupon = self
            .coupon
            .ok_or_else(|| PortfolioError::missing_field("coupon"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| PortfolioError::missing_field("maturity"))?;
        let rating = self
            .rating
            .ok_or_else(|| PortfolioError::missing_field("rating"))?;
        let current_price = self
            .current_price
            .ok_or_else(|| PortfolioError::missing_field("current_price"))?;
        let issue_price = self.issue_price.unwrap_or(Decimal::ONE_HUNDRED);

        if position_size <= Decimal::ZERO {
            return Err(PortfolioError::invalid_position(
                id,
                "position_size must be positive",
            ));
        }

        if !(coupon.is_finite() && coupon >= 0.0) {
            return Err(PortfolioError::invalid_position(
                id,
                format!("coupon must be a non-negative rate, got {coupon}"),
            ));
        }

        if current_price < Decimal::ZERO || issue_price < Decimal::ZERO {
            return Err(PortfolioError::invalid_position(
                id,
                "prices cannot be negative",
            ));
        }

        let score = scale.score(rating).ok_or_else(|| {
            PortfolioError::invalid_position(id, format!("rating {rating} is not in the scale"))
        })?;

        if let Some(numeric) = self.rating_numeric {
            if numeric != score {
                return Err(PortfolioError::invalid_position(
                    id,
                    format!("rating_numeric {numeric} does not match {rating} (expected {score})"),
                ));
            }
        }

        Ok(BondPosition {
            company: self.company.unwrap_or_else(|| ticker.to_string()),
            sector: self.sector.unwrap_or_default(),
            ticker,
            position_size,
            coupon,
            maturity,
            rating,
            rating_numeric: score,
            issue_price,
            current_price,
        })
    }
}
