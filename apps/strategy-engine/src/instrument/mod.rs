//! Instrument metadata.
//!
//! Every per-root difference in the wire protocol (contract multiplier,
//! strike encoding, right letters, symbol layout, listed expirations) is
//! declared here as data. The symbol codec and strategy builder consume
//! this metadata and contain no per-root branching.

mod registry;

pub use registry::{InstrumentRegistry, RegistryError};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Option right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptionRight {
    /// Right to buy the underlying.
    Call,
    /// Right to sell the underlying.
    Put,
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

/// Strike encoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrikeError {
    /// The strike cannot be represented in the instrument's wire format.
    #[error("strike {strike} is not encodable")]
    Unencodable {
        /// The offending strike.
        strike: Decimal,
    },
}

/// Transform between a human strike price and its wire representation.
///
/// Encoding truncates to the nearest encodable unit, so it is lossy in
/// one direction: `decode(encode(x)) == x` only holds when `x` was
/// already representable at the instrument's fixed-point precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeRule {
    /// Strike is written as-is, truncated to a whole number.
    Identity,
    /// Strike is multiplied by `divisor` and truncated to an integer
    /// (e.g. 4028.30 with divisor 10 becomes `40283`).
    FixedPoint {
        /// Fixed-point scale factor.
        divisor: u32,
    },
}

impl StrikeRule {
    /// Encode a strike into its integer wire form.
    pub fn encode(self, strike: Decimal) -> Result<i64, StrikeError> {
        let scaled = match self {
            Self::Identity => strike.trunc(),
            Self::FixedPoint { divisor } => (strike * Decimal::from(divisor)).trunc(),
        };
        match scaled.to_i64() {
            Some(raw) if raw > 0 => Ok(raw),
            _ => Err(StrikeError::Unencodable { strike }),
        }
    }

    /// Decode an integer wire strike back to a price.
    #[must_use]
    pub fn decode(self, raw: i64) -> Decimal {
        match self {
            Self::Identity => Decimal::from(raw),
            Self::FixedPoint { divisor } => Decimal::from(raw) / Decimal::from(divisor),
        }
    }

    /// Snap a strike onto the encodable grid (truncating).
    pub fn normalize(self, strike: Decimal) -> Result<Decimal, StrikeError> {
        Ok(self.decode(self.encode(strike)?))
    }
}

/// Call/put letter pair used in wire symbols.
///
/// Futures-style roots use `C`/`P`; the equity-option root uses `C`/`V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightLetters {
    /// Letter for calls.
    pub call: char,
    /// Letter for puts.
    pub put: char,
}

impl RightLetters {
    /// Wire letter for a right.
    #[must_use]
    pub const fn letter(&self, right: OptionRight) -> char {
        match right {
            OptionRight::Call => self.call,
            OptionRight::Put => self.put,
        }
    }

    /// Right for a wire letter, if it is one of the pair.
    #[must_use]
    pub const fn right(&self, letter: char) -> Option<OptionRight> {
        if letter == self.call {
            Some(OptionRight::Call)
        } else if letter == self.put {
            Some(OptionRight::Put)
        } else {
            None
        }
    }
}

/// One component of an instrument's wire symbol layout.
///
/// Different roots place the expiration code, right letter and strike in
/// different orders, so the layout itself is instrument metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPart {
    /// Fixed text (the wire root prefix).
    Literal(String),
    /// Expiration code from the instrument's listed set.
    Expiration,
    /// Right letter.
    Right,
    /// Integer-encoded strike.
    Strike,
}

/// Static metadata for one option root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    root: String,
    multiplier: u32,
    strike_rule: StrikeRule,
    rights: RightLetters,
    layout: Vec<SymbolPart>,
    expirations: Vec<String>,
}

impl Instrument {
    /// Create an instrument definition.
    #[must_use]
    pub fn new(
        root: impl Into<String>,
        multiplier: u32,
        strike_rule: StrikeRule,
        rights: RightLetters,
        layout: Vec<SymbolPart>,
        expirations: Vec<String>,
    ) -> Self {
        Self {
            root: root.into(),
            multiplier,
            strike_rule,
            rights,
            layout,
            expirations,
        }
    }

    /// Root ticker (registry key, not necessarily the wire prefix).
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Contract multiplier.
    #[must_use]
    pub const fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// Strike encoding rule.
    #[must_use]
    pub const fn strike_rule(&self) -> StrikeRule {
        self.strike_rule
    }

    /// Call/put letter pair.
    #[must_use]
    pub const fn rights(&self) -> RightLetters {
        self.rights
    }

    /// Wire symbol layout.
    #[must_use]
    pub fn layout(&self) -> &[SymbolPart] {
        &self.layout
    }

    /// Listed expiration codes.
    #[must_use]
    pub fn expirations(&self) -> &[String] {
        &self.expirations
    }

    /// Whether an expiration code is listed for this root.
    #[must_use]
    pub fn lists_expiration(&self, code: &str) -> bool {
        self.expirations.iter().any(|e| e == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn identity_rule_truncates_to_whole_number() {
        assert_eq!(StrikeRule::Identity.encode(dec!(800)).unwrap(), 800);
        assert_eq!(StrikeRule::Identity.encode(dec!(800.9)).unwrap(), 800);
        assert_eq!(StrikeRule::Identity.decode(850), dec!(850));
    }

    #[test]
    fn fixed_point_rule_scales_and_truncates() {
        let rule = StrikeRule::FixedPoint { divisor: 10 };
        assert_eq!(rule.encode(dec!(4028.30)).unwrap(), 40283);
        // 4028.37 is below the precision grid: truncated, not rounded
        assert_eq!(rule.encode(dec!(4028.37)).unwrap(), 40283);
        assert_eq!(rule.decode(40283), dec!(4028.3));
    }

    #[test]
    fn normalize_snaps_to_grid() {
        let rule = StrikeRule::FixedPoint { divisor: 10 };
        assert_eq!(rule.normalize(dec!(4028.37)).unwrap(), dec!(4028.3));
        assert_eq!(rule.normalize(dec!(4028.3)).unwrap(), dec!(4028.3));
    }

    #[test]
    fn non_positive_strikes_are_unencodable() {
        assert!(matches!(
            StrikeRule::Identity.encode(dec!(0)),
            Err(StrikeError::Unencodable { .. })
        ));
        assert!(matches!(
            StrikeRule::Identity.encode(dec!(-5)),
            Err(StrikeError::Unencodable { .. })
        ));
        // Truncates to zero
        assert!(
            StrikeRule::FixedPoint { divisor: 10 }
                .encode(dec!(0.05))
                .is_err()
        );
    }

    #[test]
    fn right_letters_map_both_ways() {
        let rights = RightLetters { call: 'C', put: 'V' };
        assert_eq!(rights.letter(OptionRight::Put), 'V');
        assert_eq!(rights.right('V'), Some(OptionRight::Put));
        assert_eq!(rights.right('P'), None);
    }
}
