//! The composite quantity value
//!
//! A `QuantityValue` holds three linked components: the magnitude as
//! supplied by the caller, the unit it is expressed in, and the comparator,
//! which is the magnitude converted to the dimension's base unit. The
//! comparator is derived at construction and never settable on its own, so
//! the three components cannot drift apart: "mutation" means building a new
//! value through `canonicalize` or `convert_to`.

use std::cmp::Ordering;
use std::fmt;

use mensura_core::Decimal;
use mensura_units::Unit;
use serde::Serialize;

use crate::error::QuantityError;

/// An immutable quantity: magnitude, unit, and base-unit comparator
#[derive(Debug, Clone, Serialize)]
pub struct QuantityValue {
    magnitude: Decimal,
    unit: Unit,
    comparator: Decimal,
}

impl QuantityValue {
    /// Assemble from already-validated parts.
    ///
    /// Crate-internal: the comparator must equal the magnitude expressed in
    /// the base unit. `canonicalize` and the codec are the public ways in.
    pub(crate) fn from_parts(magnitude: Decimal, unit: Unit, comparator: Decimal) -> Self {
        QuantityValue {
            magnitude,
            unit,
            comparator,
        }
    }

    /// The magnitude in the display unit, exactly as supplied
    pub fn magnitude(&self) -> &Decimal {
        &self.magnitude
    }

    /// The unit the magnitude is expressed in
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// The magnitude expressed in the dimension's base unit
    pub fn comparator(&self) -> &Decimal {
        &self.comparator
    }

    /// Check dimensional compatibility with another quantity
    pub fn is_compatible(&self, other: &QuantityValue) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Order two quantities
    ///
    /// Comparison happens in comparator space, so "300 gram" and
    /// "2 kilogram" order correctly. Dimensionally incompatible operands
    /// are a typed error, never a false ordering.
    pub fn compare(&self, other: &QuantityValue) -> Result<Ordering, QuantityError> {
        if !self.is_compatible(other) {
            return Err(QuantityError::IncompatibleDimension {
                from: self.unit.symbol.clone(),
                to: other.unit.symbol.clone(),
                from_dim: self.unit.dimension,
                to_dim: other.unit.dimension,
            });
        }
        Ok(self.comparator.cmp(&other.comparator))
    }
}

impl PartialEq for QuantityValue {
    fn eq(&self, other: &Self) -> bool {
        // Equal comparators in the same dimension are the same quantity,
        // whatever units express them
        self.is_compatible(other) && self.comparator == other.comparator
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::convert::canonicalize;
    use crate::input::QuantityInput;
    use mensura_units::UnitRegistry;

    fn quantity(magnitude: &str, unit: &str, registry: &UnitRegistry) -> QuantityValue {
        let config = FieldConfig::new(registry.resolve(unit).unwrap());
        canonicalize(
            QuantityInput::Pair(Decimal::from_str(magnitude).unwrap(), unit.to_string()),
            &config,
            registry,
        )
        .unwrap()
    }

    #[test]
    fn test_comparator_ordering_across_units() {
        let registry = UnitRegistry::new();
        let grams = quantity("300", "g", &registry);
        let kilos = quantity("2", "kg", &registry);

        // 300 g < 2 kg (comparators 300 vs 2000)
        assert_eq!(grams.compare(&kilos).unwrap(), Ordering::Less);
        assert_eq!(kilos.compare(&grams).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_equality_across_units() {
        let registry = UnitRegistry::new();
        let a = quantity("1", "kg", &registry);
        let b = quantity("1000", "g", &registry);
        assert_eq!(a, b);
    }

    #[test]
    fn test_incompatible_compare_is_error() {
        let registry = UnitRegistry::new();
        let mass = quantity("1", "g", &registry);
        let length = quantity("1", "m", &registry);
        assert!(matches!(
            mass.compare(&length),
            Err(QuantityError::IncompatibleDimension { .. })
        ));
        assert_ne!(mass, length);
    }

    #[test]
    fn test_zero_is_a_value() {
        let registry = UnitRegistry::new();
        let zero = quantity("0", "g", &registry);
        assert!(zero.comparator().is_zero());
        assert_eq!(zero, quantity("0", "kg", &registry));
    }

    #[test]
    fn test_display() {
        let registry = UnitRegistry::new();
        let q = quantity("300", "g", &registry);
        assert_eq!(format!("{}", q), "300 g");
    }
}
