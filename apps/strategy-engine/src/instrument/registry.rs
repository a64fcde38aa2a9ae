//! Instrument registry.
//!
//! Pure lookup table from root ticker to [`Instrument`]. Built once at
//! startup and immutable afterwards; adding an instrument means building
//! a new registry, never mutating a live one.

use std::collections::HashMap;

use thiserror::Error;

use super::{Instrument, RightLetters, StrikeRule, SymbolPart};

/// Registry lookup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The root ticker is not registered.
    #[error("unknown instrument: {root}")]
    UnknownInstrument {
        /// The root that failed to resolve.
        root: String,
    },
}

/// Immutable mapping from root ticker to instrument metadata.
#[derive(Debug, Clone)]
pub struct InstrumentRegistry {
    by_root: HashMap<String, Instrument>,
}

impl InstrumentRegistry {
    /// Build a registry from a set of instrument definitions.
    ///
    /// Later duplicates of the same root replace earlier ones.
    #[must_use]
    pub fn new(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        let by_root = instruments
            .into_iter()
            .map(|i| (i.root().to_string(), i))
            .collect();
        Self { by_root }
    }

    /// The Matba Rofex roots this engine trades.
    ///
    /// - `DLR`: dollar futures options, multiplier 1000, whole-number
    ///   strikes, rights `C`/`P`, layout `DLR <exp> <right> <strike>`
    ///   (e.g. `DLRDIC24C800`).
    /// - `GGAL`: equity options, multiplier 100, strikes at one decimal
    ///   encoded x10, rights `C`/`V`, wire prefix `GFG`, layout
    ///   `GFG <right> <strike> <exp>` (e.g. `GFGC40283FEB`).
    #[must_use]
    pub fn matba_rofex() -> Self {
        let months = [
            "ENE", "FEB", "MAR", "ABR", "MAY", "JUN", "JUL", "AGO", "SEP", "OCT", "NOV", "DIC",
        ];
        let dlr_expirations: Vec<String> = ["23", "24", "25", "26"]
            .iter()
            .flat_map(|year| months.iter().map(move |m| format!("{m}{year}")))
            .collect();
        let ggal_expirations = ["FEB", "ABR", "JUL", "AGO", "OCT", "DIC"]
            .map(String::from)
            .to_vec();

        Self::new([
            Instrument::new(
                "DLR",
                1000,
                StrikeRule::Identity,
                RightLetters { call: 'C', put: 'P' },
                vec![
                    SymbolPart::Literal("DLR".to_string()),
                    SymbolPart::Expiration,
                    SymbolPart::Right,
                    SymbolPart::Strike,
                ],
                dlr_expirations,
            ),
            Instrument::new(
                "GGAL",
                100,
                StrikeRule::FixedPoint { divisor: 10 },
                RightLetters { call: 'C', put: 'V' },
                vec![
                    SymbolPart::Literal("GFG".to_string()),
                    SymbolPart::Right,
                    SymbolPart::Strike,
                    SymbolPart::Expiration,
                ],
                ggal_expirations,
            ),
        ])
    }

    /// Resolve a root ticker.
    pub fn resolve(&self, root: &str) -> Result<&Instrument, RegistryError> {
        self.by_root
            .get(root)
            .ok_or_else(|| RegistryError::UnknownInstrument {
                root: root.to_string(),
            })
    }

    /// Iterate over all registered instruments.
    pub fn iter(&self) -> impl Iterator<Item = &Instrument> {
        self.by_root.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_roots() {
        let registry = InstrumentRegistry::matba_rofex();
        assert_eq!(registry.resolve("DLR").unwrap().multiplier(), 1000);
        assert_eq!(registry.resolve("GGAL").unwrap().multiplier(), 100);
    }

    #[test]
    fn unknown_root_is_rejected() {
        let registry = InstrumentRegistry::matba_rofex();
        assert_eq!(
            registry.resolve("YPF"),
            Err(RegistryError::UnknownInstrument {
                root: "YPF".to_string()
            })
        );
    }

    #[test]
    fn ggal_lists_only_its_cycle() {
        let registry = InstrumentRegistry::matba_rofex();
        let ggal = registry.resolve("GGAL").unwrap();
        assert!(ggal.lists_expiration("FEB"));
        assert!(!ggal.lists_expiration("ENE"));
    }
}
