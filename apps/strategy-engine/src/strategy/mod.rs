//! Multi-leg options strategy construction.
//!
//! One builder, five constructions:
//! - Vertical spreads (bull call, bear put, bear call, bull put)
//! - Iron condor
//! - Butterfly
//! - Ratio spread
//! - Straddle / strangle
//!
//! All five share the same pipeline: validate strike ordering (before
//! any network call), encode leg symbols, fetch one quote per leg,
//! compute the net premium and payoff metrics, size the position from
//! the account risk model, and assemble an immutable [`StrategyPlan`].

mod builder;
mod error;
mod leg;
mod types;
mod validation;

pub use builder::StrategyBuilder;
pub use error::StrategyError;
pub use leg::OptionLeg;
pub use types::{PayoffMetrics, RiskBound, StrategyKind, StrategyPlan, VerticalKind};
