//! Matba Rofex REST API adapters.
//!
//! Implements the engine's ports against the Primary/Rofex trading API:
//! token-based authentication, market data snapshots, account reports
//! and single-order entry.

mod account;
mod api_types;
mod auth;
mod config;
mod error;
mod http;
mod market_data;
mod orders;

pub use account::RofexAccountService;
pub use auth::AuthClient;
pub use config::{RofexConfig, RofexEnvironment};
pub use error::{AuthError, RofexError};
pub use http::RofexHttpClient;
pub use market_data::RofexMarketData;
pub use orders::RofexOrderGateway;
