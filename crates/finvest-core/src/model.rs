//! Domain Models
//!
//! Core data types for the portfolio dashboard.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a holding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetType {
    /// Exchange-listed stock
    Stock,
    /// Real-estate fund share
    RealEstateFund,
    /// Cryptocurrency
    Crypto,
    /// Fixed-income security
    FixedIncome,
    /// Cash or cash-equivalent
    Cash,
}

impl AssetType {
    /// User-facing label, also used as the allocation key
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stock => "Stock",
            Self::RealEstateFund => "Real Estate Fund",
            Self::Crypto => "Crypto",
            Self::FixedIncome => "Fixed Income",
            Self::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single holding in the portfolio
///
/// Records are immutable once created: to change one, remove it and add a
/// replacement. Tickers are not required to be unique.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Ticker symbol (e.g., "PETR4", "BTC")
    pub ticker: String,

    /// Full display name
    pub name: String,

    /// Holding category
    pub asset_type: AssetType,

    /// Quantity held (non-negative)
    pub quantity: Decimal,

    /// Average acquisition price per unit
    pub average_price: Decimal,

    /// Current price per unit (externally supplied)
    pub current_price: Decimal,

    /// Optional sector label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    /// When the record was created
    pub added_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        asset_type: AssetType,
        quantity: Decimal,
        average_price: Decimal,
        current_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticker: ticker.into().to_uppercase(),
            name: name.into(),
            asset_type,
            quantity,
            average_price,
            current_price,
            sector: None,
            added_at: Utc::now(),
        }
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Current value of the holding (quantity * current price)
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.current_price
    }

    /// Amount invested in the holding (quantity * average price)
    pub fn invested(&self) -> Decimal {
        self.quantity * self.average_price
    }

    /// Unrealized gain in currency terms
    pub fn gain(&self) -> Decimal {
        (self.current_price - self.average_price) * self.quantity
    }

    /// Unrealized gain as a percentage of the average price
    ///
    /// `None` when the average price is zero - the ratio is undefined and
    /// consumers render a placeholder instead.
    pub fn gain_percent(&self) -> Option<Decimal> {
        if self.average_price.is_zero() {
            return None;
        }
        Some((self.current_price / self.average_price - Decimal::ONE) * dec!(100))
    }
}

/// Aggregate portfolio figures
///
/// Derived, never stored: recomputed from the full asset list on every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of current values across all holdings
    pub total_value: Decimal,

    /// Sum of acquisition cost across all holdings
    pub total_invested: Decimal,

    /// Return on invested capital, in percent (0 when nothing is invested)
    pub profitability: Decimal,

    /// Absolute unrealized gain (total_value - total_invested)
    pub profitability_value: Decimal,
}

/// Current value grouped by asset type
///
/// Only types present in the portfolio produce an entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub asset_type: AssetType,
    pub value: Decimal,
}
