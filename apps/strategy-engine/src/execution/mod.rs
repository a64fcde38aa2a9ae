//! Order sequencing.
//!
//! Submits the legs of a [`StrategyPlan`](crate::strategy::StrategyPlan)
//! strictly in assembly order and reports a per-leg outcome list.

mod sequencer;

pub use sequencer::{
    LegOutcome, LegOverrides, LegStatus, OrderDefaults, OrderSequencer, SubmissionResult,
};
