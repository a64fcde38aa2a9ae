//! Quote provider port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point-in-time quote for one symbol.
///
/// Ephemeral: fetched per leg at plan-construction time and never
/// persisted. Any field may be absent on an illiquid contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Wire symbol the quote is for.
    pub symbol: String,
    /// Last traded price.
    pub last: Option<Decimal>,
    /// Best bid.
    pub bid: Option<Decimal>,
    /// Best offer.
    pub ask: Option<Decimal>,
    /// Session open.
    pub open: Option<Decimal>,
    /// Previous close.
    pub close: Option<Decimal>,
    /// Settlement price.
    pub settlement: Option<Decimal>,
    /// Open interest.
    pub open_interest: Option<Decimal>,
    /// When the quote was observed.
    pub timestamp: DateTime<Utc>,
}

/// Quote provider failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketDataError {
    /// The exchange has no market data for the symbol.
    #[error("quote unavailable for {symbol}")]
    Unavailable {
        /// The symbol with no data.
        symbol: String,
    },
    /// Authentication was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Transport or protocol failure.
    #[error("market data transport error: {0}")]
    Transport(String),
}

/// Port for fetching quotes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote for a wire symbol.
    async fn fetch(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
