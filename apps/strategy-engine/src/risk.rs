//! Account risk model.
//!
//! Pure position sizing: the risk budget is a fixed fraction of
//! available capital, and the per-contract risk is the premium times the
//! stop-loss fraction. Balance is supplied by the caller, read fresh per
//! sizing decision.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position sizing failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// The per-unit premium is zero or negative, so the risk-per-contract
    /// division is meaningless.
    #[error("invalid premium for sizing: {premium}")]
    InvalidPremium {
        /// The offending premium.
        premium: Decimal,
    },
    /// A risk fraction outside (0, 1].
    #[error("invalid risk fraction: {fraction}")]
    InvalidFraction {
        /// The offending fraction.
        fraction: Decimal,
    },
}

/// Risk limits applied to every sizing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Fraction of available capital risked per trade.
    pub risk_fraction: Decimal,
    /// Assumed stop-loss as a fraction of the premium.
    pub stop_loss_fraction: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            risk_fraction: dec!(0.02),
            stop_loss_fraction: dec!(0.10),
        }
    }
}

/// Maximum contracts financeable by the risk budget.
///
/// `floor(balance * risk_fraction / (premium * stop_loss_fraction))`,
/// clamped at zero when the budget cannot finance one contract.
pub fn max_position_size(
    balance: Decimal,
    risk_fraction: Decimal,
    per_unit_premium: Decimal,
    stop_loss_fraction: Decimal,
) -> Result<u64, SizingError> {
    if per_unit_premium <= Decimal::ZERO {
        return Err(SizingError::InvalidPremium {
            premium: per_unit_premium,
        });
    }
    for fraction in [risk_fraction, stop_loss_fraction] {
        if fraction <= Decimal::ZERO || fraction > Decimal::ONE {
            return Err(SizingError::InvalidFraction { fraction });
        }
    }

    let budget = balance * risk_fraction;
    let risk_per_contract = per_unit_premium * stop_loss_fraction;
    let contracts = (budget / risk_per_contract).floor();
    Ok(contracts.to_u64().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_from_risk_budget() {
        // 100_000 * 0.02 = 2_000 budget; 2.0 * 0.10 = 0.2 per contract
        let size =
            max_position_size(dec!(100000), dec!(0.02), dec!(2.0), dec!(0.10)).unwrap();
        assert_eq!(size, 10_000);
    }

    #[test]
    fn floors_fractional_contracts() {
        // 1_000 * 0.02 = 20 budget; 3.0 * 0.10 = 0.3 -> 66.66 contracts
        let size = max_position_size(dec!(1000), dec!(0.02), dec!(3.0), dec!(0.10)).unwrap();
        assert_eq!(size, 66);
    }

    #[test]
    fn returns_zero_when_budget_cannot_finance_one_contract() {
        let size = max_position_size(dec!(100), dec!(0.02), dec!(50), dec!(0.10)).unwrap();
        assert_eq!(size, 0);

        // Negative balance clamps to zero rather than going negative
        let size = max_position_size(dec!(-5000), dec!(0.02), dec!(2), dec!(0.10)).unwrap();
        assert_eq!(size, 0);
    }

    #[test]
    fn rejects_non_positive_premium() {
        for premium in [dec!(0), dec!(-1.5)] {
            assert_eq!(
                max_position_size(dec!(100000), dec!(0.02), premium, dec!(0.10)),
                Err(SizingError::InvalidPremium { premium })
            );
        }
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        assert!(matches!(
            max_position_size(dec!(100000), dec!(0), dec!(2), dec!(0.10)),
            Err(SizingError::InvalidFraction { .. })
        ));
        assert!(matches!(
            max_position_size(dec!(100000), dec!(0.02), dec!(2), dec!(1.5)),
            Err(SizingError::InvalidFraction { .. })
        ));
    }
}
