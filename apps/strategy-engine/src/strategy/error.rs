//! Strategy construction errors.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::instrument::RegistryError;
use crate::ports::{AccountError, MarketDataError};
use crate::risk::SizingError;
use crate::symbol::SymbolError;

/// Errors from strategy construction.
///
/// Validation and pricing failures abort plan construction before any
/// order is submitted; none are retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    /// The root is not in the instrument registry.
    #[error(transparent)]
    Instrument(#[from] RegistryError),

    /// Symbol encoding failed.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// A leg quote was missing the required price field.
    #[error("quote unavailable for {symbol}")]
    QuoteUnavailable {
        /// The leg symbol with no usable quote.
        symbol: String,
    },

    /// Strikes do not match the strategy's required shape.
    #[error("invalid strike ordering: {message} (strikes: {strikes:?})")]
    InvalidStrikeOrdering {
        /// The constraint that was violated.
        message: String,
        /// The offending strike set, in the order given.
        strikes: Vec<Decimal>,
    },

    /// A ratio spread with a ratio below one.
    #[error("invalid ratio: {ratio}")]
    InvalidRatio {
        /// The offending ratio.
        ratio: u64,
    },

    /// Position sizing rejected the inputs.
    #[error(transparent)]
    Sizing(#[from] SizingError),

    /// The quote provider failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The account service failed.
    #[error(transparent)]
    Account(#[from] AccountError),
}
