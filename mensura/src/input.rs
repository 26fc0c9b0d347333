//! Caller input normalization
//!
//! Callers supply quantities in a small closed set of shapes; a single
//! normalization step resolves each to (magnitude, unit) before anything
//! enters the canonicalization pipeline.

use mensura_core::Decimal;
use mensura_units::{parse_quantity, parse_unit, Unit, UnitRegistry};

use crate::error::QuantityError;

/// The accepted input shapes for a quantity
#[derive(Debug, Clone)]
pub enum QuantityInput {
    /// Magnitude with an already-resolved unit descriptor
    Value(Decimal, Unit),
    /// Magnitude with a unit expression still to resolve (e.g., "kg", "m/s")
    Pair(Decimal, String),
    /// A full quantity string (e.g., "2.5 pound")
    Text(String),
}

impl QuantityInput {
    /// Resolve to (magnitude, unit) through the registry
    pub fn normalize(self, registry: &UnitRegistry) -> Result<(Decimal, Unit), QuantityError> {
        match self {
            QuantityInput::Value(magnitude, unit) => Ok((magnitude, unit)),
            QuantityInput::Pair(magnitude, symbol) => {
                let unit = parse_unit(registry, &symbol)?;
                Ok((magnitude, unit))
            }
            QuantityInput::Text(text) => {
                let (magnitude, unit) = parse_quantity(registry, &text)?;
                Ok((magnitude, unit))
            }
        }
    }
}

impl From<(Decimal, Unit)> for QuantityInput {
    fn from((magnitude, unit): (Decimal, Unit)) -> Self {
        QuantityInput::Value(magnitude, unit)
    }
}

impl From<(Decimal, &str)> for QuantityInput {
    fn from((magnitude, symbol): (Decimal, &str)) -> Self {
        QuantityInput::Pair(magnitude, symbol.to_string())
    }
}

impl From<&str> for QuantityInput {
    fn from(text: &str) -> Self {
        QuantityInput::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_value() {
        let registry = UnitRegistry::new();
        let unit = registry.resolve("g").unwrap();
        let input = QuantityInput::Value(Decimal::from_i64(300), unit);
        let (magnitude, unit) = input.normalize(&registry).unwrap();
        assert_eq!(magnitude, Decimal::from_i64(300));
        assert_eq!(unit.symbol, "g");
    }

    #[test]
    fn test_normalize_pair() {
        let registry = UnitRegistry::new();
        let input: QuantityInput = (Decimal::from_i64(2), "kilogram").into();
        let (_, unit) = input.normalize(&registry).unwrap();
        assert_eq!(unit.symbol, "kg");
    }

    #[test]
    fn test_normalize_text() {
        let registry = UnitRegistry::new();
        let input: QuantityInput = "2.5 pound".into();
        let (magnitude, unit) = input.normalize(&registry).unwrap();
        assert_eq!(magnitude, Decimal::from_str("2.5").unwrap());
        assert_eq!(unit.symbol, "lb");
    }

    #[test]
    fn test_normalize_unknown_unit() {
        let registry = UnitRegistry::new();
        let input: QuantityInput = (Decimal::from_i64(1), "wibble").into();
        assert!(matches!(
            input.normalize(&registry),
            Err(QuantityError::UnresolvedUnit { .. })
        ));
    }
}
