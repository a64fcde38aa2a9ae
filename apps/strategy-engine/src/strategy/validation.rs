//! Strike-shape validation.
//!
//! Runs before any quote fetch so a bad strike set never costs a
//! network round trip.

use rust_decimal::Decimal;

use super::error::StrategyError;

/// Require strictly ascending strikes.
pub fn ensure_strictly_ascending(
    strikes: &[Decimal],
    message: &str,
) -> Result<(), StrategyError> {
    if strikes.windows(2).all(|pair| pair[0] < pair[1]) {
        Ok(())
    } else {
        Err(StrategyError::InvalidStrikeOrdering {
            message: message.to_string(),
            strikes: strikes.to_vec(),
        })
    }
}

/// Require two distinct strikes.
pub fn ensure_distinct(
    a: Decimal,
    b: Decimal,
    message: &str,
) -> Result<(), StrategyError> {
    if a == b {
        Err(StrategyError::InvalidStrikeOrdering {
            message: message.to_string(),
            strikes: vec![a, b],
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ascending_passes() {
        assert!(
            ensure_strictly_ascending(&[dec!(40), dec!(45), dec!(65), dec!(71)], "condor")
                .is_ok()
        );
    }

    #[test]
    fn equal_or_descending_fails() {
        for strikes in [
            vec![dec!(45), dec!(45)],
            vec![dec!(50), dec!(45)],
            vec![dec!(40), dec!(50), dec!(50)],
        ] {
            let err = ensure_strictly_ascending(&strikes, "shape").unwrap_err();
            assert!(matches!(
                err,
                StrategyError::InvalidStrikeOrdering { strikes: s, .. } if s == strikes
            ));
        }
    }

    #[test]
    fn distinct_check() {
        assert!(ensure_distinct(dec!(1), dec!(2), "x").is_ok());
        assert!(ensure_distinct(dec!(2), dec!(2), "x").is_err());
    }
}
