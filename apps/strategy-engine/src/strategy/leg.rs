//! Strategy leg type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instrument::OptionRight;
use crate::ports::OrderSide;

/// One buy/sell instruction for a single option contract.
///
/// Built by the strategy builder; immutable afterwards and owned
/// exclusively by the plan that contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionLeg {
    /// Instrument root ticker.
    pub root: String,
    /// Expiration code.
    pub expiration: String,
    /// Option right.
    pub right: OptionRight,
    /// Strike price (normalized to the instrument's encodable grid).
    pub strike: Decimal,
    /// Buy or sell.
    pub side: OrderSide,
    /// Contracts for this leg.
    pub quantity: u64,
    /// Limit price for submission.
    pub limit_price: Decimal,
    /// Derived wire symbol.
    pub symbol: String,
}
