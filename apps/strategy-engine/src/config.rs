//! Engine configuration.
//!
//! One immutable struct passed into the builder and sequencer at
//! construction; nothing reads mutable global state.

use serde::{Deserialize, Serialize};

use crate::risk::RiskConfig;

/// Default exchange market id.
pub const DEFAULT_MARKET_ID: &str = "ROFX";

/// Immutable configuration for strategy construction and submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Trading account id.
    pub account: String,
    /// Exchange market id.
    pub market_id: String,
    /// Risk limits for position sizing.
    pub risk: RiskConfig,
}

impl EngineConfig {
    /// Create a configuration for an account with default risk limits.
    #[must_use]
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            market_id: DEFAULT_MARKET_ID.to_string(),
            risk: RiskConfig::default(),
        }
    }

    /// Override the market id.
    #[must_use]
    pub fn with_market_id(mut self, market_id: impl Into<String>) -> Self {
        self.market_id = market_id.into();
        self
    }

    /// Override the risk limits.
    #[must_use]
    pub const fn with_risk(mut self, risk: RiskConfig) -> Self {
        self.risk = risk;
        self
    }
}
