//! Order submission port.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy to open/close.
    Buy,
    /// Sell to open/close.
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Limit order.
    Limit,
    /// Market order.
    Market,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "LIMIT"),
            Self::Market => write!(f, "MARKET"),
        }
    }
}

/// Time in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeInForce {
    /// Valid for the trading day.
    Day,
    /// Good till cancelled.
    Gtc,
    /// Immediate or cancel.
    Ioc,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "DAY"),
            Self::Gtc => write!(f, "GTC"),
            Self::Ioc => write!(f, "IOC"),
        }
    }
}

/// A fully specified single-leg order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTicket {
    /// Client-assigned order id.
    pub client_order_id: String,
    /// Wire symbol.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Contracts.
    pub quantity: u64,
    /// Limit price.
    pub price: Decimal,
    /// Order type.
    pub order_type: OrderType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Trading account.
    pub account: String,
    /// Exchange market id.
    pub market_id: String,
    /// Iceberg flag.
    pub iceberg: bool,
    /// Cancel-previous flag.
    pub cancel_previous: bool,
}

/// Acknowledgment for an accepted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAck {
    /// Exchange-assigned order id.
    pub broker_order_id: String,
}

/// Order gateway failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The exchange rejected the order.
    #[error("order rejected: {reason}")]
    Rejected {
        /// Rejection reason reported by the exchange.
        reason: String,
    },
    /// Authentication was rejected.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Transport or protocol failure.
    #[error("order transport error: {0}")]
    Transport(String),
}

/// Port for submitting orders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit one order ticket.
    async fn submit(&self, ticket: &OrderTicket) -> Result<OrderAck, GatewayError>;
}
