//! Collaborator contracts.
//!
//! The engine talks to the exchange only through these async traits.
//! Production adapters live in [`crate::rofex`]; tests substitute mocks.

mod account;
mod market_data;
mod order_gateway;

pub use account::{AccountError, AccountService};
pub use market_data::{MarketDataError, Quote, QuoteProvider};
pub use order_gateway::{
    GatewayError, OrderAck, OrderGateway, OrderSide, OrderTicket, OrderType, TimeInForce,
};

#[cfg(test)]
pub use account::MockAccountService;
#[cfg(test)]
pub use market_data::MockQuoteProvider;
#[cfg(test)]
pub use order_gateway::MockOrderGateway;
