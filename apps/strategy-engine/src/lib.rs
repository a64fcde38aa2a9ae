// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Multi-leg options strategy engine for Matba Rofex.
//!
//! Builds defined-structure option strategies (verticals, iron condors,
//! butterflies, ratio spreads, straddles and strangles) from live
//! quotes, sizes them against available account capital, and submits
//! the legs in a fixed order through the exchange's REST API.
//!
//! # Layers
//!
//! - `instrument` / `symbol`: underlying metadata and the wire symbol
//!   codec built from it
//! - `ports`: interfaces to the outside world (`QuoteProvider`,
//!   `AccountService`, `OrderGateway`)
//! - `risk` / `strategy`: position sizing and plan construction
//! - `execution`: sequential leg submission with per-leg outcomes
//! - `rofex`: adapters implementing the ports against the Primary API

pub mod config;
pub mod execution;
pub mod instrument;
pub mod ports;
pub mod risk;
pub mod rofex;
pub mod strategy;
pub mod symbol;
pub mod telemetry;

pub use config::EngineConfig;
pub use execution::{OrderDefaults, OrderSequencer, SubmissionResult};
pub use instrument::{InstrumentRegistry, OptionRight};
pub use strategy::{StrategyBuilder, StrategyError, StrategyPlan};
