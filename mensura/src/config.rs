//! Per-field configuration
//!
//! A `FieldConfig` declares how one stored column coerces caller input
//! into quantity values: the default unit (whose dimension fixes the
//! column's dimension), optional unit choices, the numeric kind, digit
//! capacity, display precision, and rounding policy. Configuration is
//! immutable after construction.

use mensura_core::{RoundingMode, DEFAULT_PRECISION};
use mensura_units::{Dimension, Unit, UnitRegistry};
use serde::{Deserialize, Serialize};

use crate::error::QuantityError;

/// The numeric kind a field stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericKind {
    /// Whole-number magnitudes only
    Integer,
    /// Arbitrary-precision decimal magnitudes
    Decimal,
}

/// Configuration for one quantity-valued column
#[derive(Debug, Clone)]
pub struct FieldConfig {
    default_unit: Unit,
    unit_choices: Vec<Unit>,
    numeric_kind: NumericKind,
    max_digits: Option<usize>,
    display_decimal_places: Option<u32>,
    rounding_method: RoundingMode,
    decimal_precision: usize,
}

impl FieldConfig {
    /// Configuration with the given default unit and project defaults for
    /// everything else
    pub fn new(default_unit: Unit) -> Self {
        FieldConfig {
            default_unit,
            unit_choices: Vec::new(),
            numeric_kind: NumericKind::Decimal,
            max_digits: None,
            display_decimal_places: None,
            rounding_method: RoundingMode::default(),
            decimal_precision: DEFAULT_PRECISION,
        }
    }

    /// Declare the allowed unit choices
    ///
    /// Every choice must share the default unit's dimension; a mismatch is
    /// a configuration error and fails here, at declaration time. Declared
    /// choices also restrict coercion: `canonicalize` rejects input units
    /// outside the list (the default unit is always accepted).
    pub fn with_unit_choices(mut self, choices: Vec<Unit>) -> Result<Self, QuantityError> {
        for choice in &choices {
            if !choice.is_compatible(&self.default_unit) {
                return Err(QuantityError::IncompatibleDimension {
                    from: choice.symbol.clone(),
                    to: self.default_unit.symbol.clone(),
                    from_dim: choice.dimension,
                    to_dim: self.default_unit.dimension,
                });
            }
        }
        self.unit_choices = choices;
        Ok(self)
    }

    /// Set the numeric kind
    pub fn with_numeric_kind(mut self, kind: NumericKind) -> Self {
        self.numeric_kind = kind;
        self
    }

    /// Cap the magnitude's significant digit count (fixed-width columns)
    pub fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = Some(max_digits);
        self
    }

    /// Set the display precision in decimal places
    pub fn with_display_decimal_places(mut self, places: u32) -> Self {
        self.display_decimal_places = Some(places);
        self
    }

    /// Set the display rounding method
    pub fn with_rounding_method(mut self, method: RoundingMode) -> Self {
        self.rounding_method = method;
        self
    }

    /// Raise the working decimal precision for this field
    pub fn with_decimal_precision(mut self, precision: usize) -> Self {
        self.decimal_precision = precision.max(DEFAULT_PRECISION);
        self
    }

    // ========== Accessors ==========

    pub fn default_unit(&self) -> &Unit {
        &self.default_unit
    }

    pub fn unit_choices(&self) -> &[Unit] {
        &self.unit_choices
    }

    pub fn numeric_kind(&self) -> NumericKind {
        self.numeric_kind
    }

    pub fn max_digits(&self) -> Option<usize> {
        self.max_digits
    }

    pub fn display_decimal_places(&self) -> Option<u32> {
        self.display_decimal_places
    }

    pub fn rounding_method(&self) -> RoundingMode {
        self.rounding_method
    }

    pub fn decimal_precision(&self) -> usize {
        self.decimal_precision
    }

    /// The column's dimension (the default unit's dimension)
    pub fn dimension(&self) -> Dimension {
        self.default_unit.dimension
    }

    /// The base unit all comparators for this field are expressed in
    pub fn base_unit(&self, registry: &UnitRegistry) -> Unit {
        registry.base_unit_for(self.default_unit.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::Decimal;

    fn registry() -> UnitRegistry {
        UnitRegistry::new()
    }

    #[test]
    fn test_defaults() {
        let registry = registry();
        let config = FieldConfig::new(registry.resolve("g").unwrap());
        assert_eq!(config.numeric_kind(), NumericKind::Decimal);
        assert_eq!(config.decimal_precision(), DEFAULT_PRECISION);
        assert!(config.display_decimal_places().is_none());
    }

    #[test]
    fn test_unit_choices_same_dimension() {
        let registry = registry();
        let config = FieldConfig::new(registry.resolve("g").unwrap())
            .with_unit_choices(vec![
                registry.resolve("g").unwrap(),
                registry.resolve("kg").unwrap(),
                registry.resolve("lb").unwrap(),
            ])
            .unwrap();
        assert_eq!(config.unit_choices().len(), 3);
    }

    #[test]
    fn test_unit_choices_dimension_mismatch_fails() {
        let registry = registry();
        let result = FieldConfig::new(registry.resolve("g").unwrap()).with_unit_choices(vec![
            registry.resolve("kg").unwrap(),
            registry.resolve("m").unwrap(),
        ]);
        assert!(matches!(
            result,
            Err(QuantityError::IncompatibleDimension { .. })
        ));
    }

    #[test]
    fn test_base_unit() {
        let registry = registry();
        let config = FieldConfig::new(registry.resolve("kg").unwrap());
        let base = config.base_unit(&registry);
        assert_eq!(base.symbol, "g");
        assert_eq!(base.to_base_factor, Decimal::from_i64(1));
    }

    #[test]
    fn test_precision_never_lowered() {
        let registry = registry();
        let config = FieldConfig::new(registry.resolve("g").unwrap()).with_decimal_precision(5);
        assert_eq!(config.decimal_precision(), DEFAULT_PRECISION);
    }
}
