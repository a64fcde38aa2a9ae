//! Wire symbol codec.
//!
//! Encodes `(root, expiration, right, strike)` into the exchange wire
//! symbol and decodes it back, driven entirely by the instrument's
//! declared layout. Encoding truncates the strike to the instrument's
//! fixed-point grid, so the round trip is exact only for strikes already
//! on that grid (see [`StrikeRule`](crate::instrument::StrikeRule)).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::instrument::{Instrument, InstrumentRegistry, OptionRight, StrikeError, SymbolPart};

/// Symbol codec failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// The wire symbol does not match the instrument's layout.
    #[error("malformed symbol: {symbol}")]
    MalformedSymbol {
        /// The offending wire symbol.
        symbol: String,
    },
    /// The expiration code is not listed for the instrument.
    #[error("expiration {expiration} is not listed for {root}")]
    UnknownExpiration {
        /// Instrument root.
        root: String,
        /// The offending expiration code.
        expiration: String,
    },
    /// The strike cannot be represented on the wire.
    #[error(transparent)]
    Strike(#[from] StrikeError),
}

/// A decoded option symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedOption {
    /// Instrument root ticker.
    pub root: String,
    /// Expiration code.
    pub expiration: String,
    /// Option right.
    pub right: OptionRight,
    /// Strike price (decoded through the instrument's strike rule).
    pub strike: Decimal,
}

/// Encode an option into its wire symbol.
pub fn encode(
    instrument: &Instrument,
    expiration: &str,
    right: OptionRight,
    strike: Decimal,
) -> Result<String, SymbolError> {
    if !instrument.lists_expiration(expiration) {
        return Err(SymbolError::UnknownExpiration {
            root: instrument.root().to_string(),
            expiration: expiration.to_string(),
        });
    }
    let raw_strike = instrument.strike_rule().encode(strike)?;

    let mut wire = String::new();
    for part in instrument.layout() {
        match part {
            SymbolPart::Literal(text) => wire.push_str(text),
            SymbolPart::Expiration => wire.push_str(expiration),
            SymbolPart::Right => wire.push(instrument.rights().letter(right)),
            SymbolPart::Strike => wire.push_str(&raw_strike.to_string()),
        }
    }
    Ok(wire)
}

/// Decode a wire symbol against one instrument's layout.
pub fn decode(instrument: &Instrument, wire: &str) -> Result<DecodedOption, SymbolError> {
    let malformed = || SymbolError::MalformedSymbol {
        symbol: wire.to_string(),
    };

    let mut rest = wire;
    let mut expiration: Option<&str> = None;
    let mut right: Option<OptionRight> = None;
    let mut strike: Option<i64> = None;

    for part in instrument.layout() {
        match part {
            SymbolPart::Literal(text) => {
                rest = rest.strip_prefix(text.as_str()).ok_or_else(malformed)?;
            }
            SymbolPart::Expiration => {
                let code = instrument
                    .expirations()
                    .iter()
                    .find(|code| rest.starts_with(code.as_str()))
                    .ok_or_else(malformed)?;
                expiration = Some(code);
                rest = &rest[code.len()..];
            }
            SymbolPart::Right => {
                let letter = rest.chars().next().ok_or_else(malformed)?;
                right = Some(instrument.rights().right(letter).ok_or_else(malformed)?);
                rest = &rest[letter.len_utf8()..];
            }
            SymbolPart::Strike => {
                let digits = rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len());
                if digits == 0 {
                    return Err(malformed());
                }
                strike = Some(rest[..digits].parse().map_err(|_| malformed())?);
                rest = &rest[digits..];
            }
        }
    }

    // All layout parts present and nothing trailing
    match (expiration, right, strike, rest.is_empty()) {
        (Some(expiration), Some(right), Some(raw), true) => Ok(DecodedOption {
            root: instrument.root().to_string(),
            expiration: expiration.to_string(),
            right,
            strike: instrument.strike_rule().decode(raw),
        }),
        _ => Err(malformed()),
    }
}

/// Decode a wire symbol by trying every registered instrument.
pub fn resolve_and_decode<'a>(
    registry: &'a InstrumentRegistry,
    wire: &str,
) -> Result<(&'a Instrument, DecodedOption), SymbolError> {
    registry
        .iter()
        .find_map(|instrument| decode(instrument, wire).ok().map(|d| (instrument, d)))
        .ok_or_else(|| SymbolError::MalformedSymbol {
            symbol: wire.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::InstrumentRegistry;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn registry() -> InstrumentRegistry {
        InstrumentRegistry::matba_rofex()
    }

    #[test]
    fn encodes_dlr_root_expiration_right_strike() {
        let registry = registry();
        let dlr = registry.resolve("DLR").unwrap();
        let wire = encode(dlr, "DIC24", OptionRight::Call, dec!(800)).unwrap();
        assert_eq!(wire, "DLRDIC24C800");
    }

    #[test]
    fn encodes_ggal_prefix_right_strike_expiration() {
        let registry = registry();
        let ggal = registry.resolve("GGAL").unwrap();
        let call = encode(ggal, "FEB", OptionRight::Call, dec!(4028.3)).unwrap();
        assert_eq!(call, "GFGC40283FEB");
        // GGAL puts use 'V'
        let put = encode(ggal, "FEB", OptionRight::Put, dec!(4028.3)).unwrap();
        assert_eq!(put, "GFGV40283FEB");
    }

    #[test]
    fn decode_inverts_encode() {
        let registry = registry();
        let dlr = registry.resolve("DLR").unwrap();
        let decoded = decode(dlr, "DLRDIC24P850").unwrap();
        assert_eq!(
            decoded,
            DecodedOption {
                root: "DLR".to_string(),
                expiration: "DIC24".to_string(),
                right: OptionRight::Put,
                strike: dec!(850),
            }
        );
    }

    #[test]
    fn encoding_truncates_off_grid_strikes() {
        let registry = registry();
        let ggal = registry.resolve("GGAL").unwrap();
        let wire = encode(ggal, "FEB", OptionRight::Call, dec!(4028.37)).unwrap();
        assert_eq!(wire, "GFGC40283FEB");
        assert_eq!(decode(ggal, &wire).unwrap().strike, dec!(4028.3));
    }

    #[test]
    fn rejects_unlisted_expiration() {
        let registry = registry();
        let ggal = registry.resolve("GGAL").unwrap();
        assert!(matches!(
            encode(ggal, "ENE", OptionRight::Call, dec!(4000)),
            Err(SymbolError::UnknownExpiration { .. })
        ));
    }

    #[test]
    fn rejects_malformed_symbols() {
        let registry = registry();
        let dlr = registry.resolve("DLR").unwrap();
        for wire in [
            "DLX24C800",    // wrong root
            "DLRZZZ24C800", // unknown expiration
            "DLRDIC24X800", // unknown right letter
            "DLRDIC24C",    // missing strike
            "DLRDIC24C800X", // trailing garbage
        ] {
            assert_eq!(
                decode(dlr, wire),
                Err(SymbolError::MalformedSymbol {
                    symbol: wire.to_string()
                }),
                "expected {wire} to be malformed"
            );
        }
    }

    #[test]
    fn resolve_and_decode_finds_the_instrument() {
        let registry = registry();
        let (instrument, decoded) = resolve_and_decode(&registry, "GFGV40283FEB").unwrap();
        assert_eq!(instrument.root(), "GGAL");
        assert_eq!(decoded.strike, dec!(4028.3));

        assert!(resolve_and_decode(&registry, "NOPE123").is_err());
    }

    proptest! {
        // Round trip holds for every strike on the encodable grid.
        #[test]
        fn round_trip_on_grid(
            raw in 1i64..10_000_000,
            call in proptest::bool::ANY,
            ggal in proptest::bool::ANY,
            exp_index in any::<proptest::sample::Index>(),
        ) {
            let registry = registry();
            let instrument = registry
                .resolve(if ggal { "GGAL" } else { "DLR" })
                .unwrap();
            let expirations = instrument.expirations();
            let expiration = expirations[exp_index.index(expirations.len())].clone();
            let right = if call { OptionRight::Call } else { OptionRight::Put };
            let strike = instrument.strike_rule().decode(raw);

            let wire = encode(instrument, &expiration, right, strike).unwrap();
            let decoded = decode(instrument, &wire).unwrap();
            prop_assert_eq!(decoded.root, instrument.root());
            prop_assert_eq!(decoded.expiration, expiration);
            prop_assert_eq!(decoded.right, right);
            prop_assert_eq!(decoded.strike, strike);
        }
    }
}
