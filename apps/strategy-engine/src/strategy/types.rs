//! Strategy kinds, payoff metrics and the assembled plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::instrument::OptionRight;

use super::leg::OptionLeg;

/// Direction of a vertical spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalKind {
    /// Long call at the lower strike, short call above.
    BullCall,
    /// Long put at the higher strike, short put below.
    BearPut,
    /// Short call at the lower strike, long call above.
    BearCall,
    /// Short put at the higher strike, long put below.
    BullPut,
}

impl VerticalKind {
    /// The option right both legs share.
    #[must_use]
    pub const fn right(self) -> OptionRight {
        match self {
            Self::BullCall | Self::BearCall => OptionRight::Call,
            Self::BearPut | Self::BullPut => OptionRight::Put,
        }
    }

    /// Whether the position is opened for a net debit (long premium).
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::BullCall | Self::BearPut)
    }
}

impl std::fmt::Display for VerticalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BullCall => write!(f, "bull_call"),
            Self::BearPut => write!(f, "bear_put"),
            Self::BearCall => write!(f, "bear_call"),
            Self::BullPut => write!(f, "bull_put"),
        }
    }
}

/// Strategy shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Two-leg vertical spread.
    Vertical(VerticalKind),
    /// Short put spread below, short call spread above.
    IronCondor,
    /// Long-short(x2)-long at ascending strikes, one right.
    Butterfly(OptionRight),
    /// One long leg against `ratio` short legs, one right.
    RatioSpread(OptionRight),
    /// Long call and long put at the same strike.
    Straddle,
    /// Long call and long put at different strikes.
    Strangle,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertical(kind) => write!(f, "{kind}"),
            Self::IronCondor => write!(f, "iron_condor"),
            Self::Butterfly(OptionRight::Call) => write!(f, "call_butterfly"),
            Self::Butterfly(OptionRight::Put) => write!(f, "put_butterfly"),
            Self::RatioSpread(OptionRight::Call) => write!(f, "call_ratio_spread"),
            Self::RatioSpread(OptionRight::Put) => write!(f, "put_ratio_spread"),
            Self::Straddle => write!(f, "straddle"),
            Self::Strangle => write!(f, "strangle"),
        }
    }
}

/// A payoff bound that may be unbounded.
///
/// Unbounded risk is a sentinel, never a number: a call ratio spread's
/// max loss must not be mistaken for a large finite figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bound", content = "value", rename_all = "snake_case")]
pub enum RiskBound {
    /// Bounded payoff, scaled by the contract multiplier.
    Limited(Decimal),
    /// No finite bound.
    Unlimited,
}

/// Payoff metrics for one unit of the strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMetrics {
    /// Maximum profit at expiration.
    pub max_profit: RiskBound,
    /// Maximum loss at expiration.
    pub max_loss: RiskBound,
    /// Underlying prices where net payoff is zero at expiration.
    pub breakevens: Vec<Decimal>,
}

/// A fully specified multi-leg plan.
///
/// Created atomically by the builder, consumed once by the order
/// sequencer, never mutated. Legs are listed in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyPlan {
    /// Strategy shape.
    pub kind: StrategyKind,
    /// Instrument root.
    pub root: String,
    /// Shared expiration code.
    pub expiration: String,
    /// Legs in submission order.
    pub legs: Vec<OptionLeg>,
    /// Net per-unit premium, debit positive / credit negative,
    /// unscaled by the contract multiplier.
    pub net_premium: Decimal,
    /// Payoff metrics (scaled by the contract multiplier).
    pub metrics: PayoffMetrics,
    /// Contracts per unit leg (ratio legs carry a multiple of this).
    pub contracts: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_kind_right_and_direction() {
        assert_eq!(VerticalKind::BullCall.right(), OptionRight::Call);
        assert_eq!(VerticalKind::BullPut.right(), OptionRight::Put);
        assert!(VerticalKind::BearPut.is_debit());
        assert!(!VerticalKind::BearCall.is_debit());
    }

    #[test]
    fn kind_labels() {
        assert_eq!(StrategyKind::Vertical(VerticalKind::BullCall).to_string(), "bull_call");
        assert_eq!(StrategyKind::Butterfly(OptionRight::Put).to_string(), "put_butterfly");
        assert_eq!(StrategyKind::IronCondor.to_string(), "iron_condor");
    }
}
