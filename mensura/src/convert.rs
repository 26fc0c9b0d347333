//! Canonicalization and conversion
//!
//! `canonicalize` turns normalized caller input into a `QuantityValue`,
//! deriving the comparator in the field's base unit. `convert_to`
//! re-expresses an existing quantity in another compatible unit, always
//! starting from the comparator so repeated conversions never compound
//! rounding error. Display rounding happens only in `format_display`;
//! stored magnitudes and comparators keep full configured precision.

use mensura_core::Decimal;
use mensura_units::{parse_unit, Unit, UnitRegistry};

use crate::config::{FieldConfig, NumericKind};
use crate::error::QuantityError;
use crate::input::QuantityInput;
use crate::quantity::QuantityValue;

/// Coerce caller input into a canonical quantity for the given field
///
/// When the field declares unit choices, input units outside the list
/// (other than the default unit) are rejected as unresolved for this
/// field; stored rows are not re-checked on decode.
pub fn canonicalize(
    input: QuantityInput,
    config: &FieldConfig,
    registry: &UnitRegistry,
) -> Result<QuantityValue, QuantityError> {
    let (magnitude, unit) = input.normalize(registry)?;

    if !unit.is_compatible(config.default_unit()) {
        return Err(QuantityError::IncompatibleDimension {
            from: unit.symbol.clone(),
            to: config.default_unit().symbol.clone(),
            from_dim: unit.dimension,
            to_dim: config.default_unit().dimension,
        });
    }

    let choices = config.unit_choices();
    if !choices.is_empty()
        && unit.symbol != config.default_unit().symbol
        && !choices.iter().any(|choice| choice.symbol == unit.symbol)
    {
        return Err(QuantityError::UnresolvedUnit {
            symbol: unit.symbol.clone(),
        });
    }

    if config.numeric_kind() == NumericKind::Integer && !magnitude.is_integer() {
        return Err(QuantityError::PrecisionOverflow {
            detail: format!(
                "magnitude {} is not an integer but the field stores integers",
                magnitude
            ),
        });
    }

    if let Some(max_digits) = config.max_digits() {
        let digits = magnitude.digit_count();
        if digits > max_digits {
            return Err(QuantityError::PrecisionOverflow {
                detail: format!(
                    "magnitude {} has {} significant digits, field capacity is {}",
                    magnitude, digits, max_digits
                ),
            });
        }
    }

    let magnitude = magnitude.with_precision(config.decimal_precision());
    let comparator = unit.to_base(&magnitude);

    Ok(QuantityValue::from_parts(magnitude, unit, comparator))
}

impl QuantityValue {
    /// Re-express this quantity in another unit, resolved by name
    pub fn convert_to(
        &self,
        target: &str,
        registry: &UnitRegistry,
    ) -> Result<QuantityValue, QuantityError> {
        let target_unit = parse_unit(registry, target)?;
        self.convert_to_unit(&target_unit)
    }

    /// Re-express this quantity in another compatible unit
    ///
    /// The new magnitude is computed from the comparator, not from the
    /// current display magnitude, and the comparator itself is carried over
    /// unchanged - a chain of conversions cannot drift.
    pub fn convert_to_unit(&self, target: &Unit) -> Result<QuantityValue, QuantityError> {
        if !self.unit().is_compatible(target) {
            return Err(QuantityError::IncompatibleDimension {
                from: self.unit().symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.unit().dimension,
                to_dim: target.dimension,
            });
        }

        let magnitude = target.from_base(self.comparator())?;
        Ok(QuantityValue::from_parts(
            magnitude,
            target.clone(),
            self.comparator().clone(),
        ))
    }
}

/// Magnitude rounded for display per the field's policy
///
/// Returns the magnitude untouched when the field declares no display
/// precision.
pub fn display_magnitude(quantity: &QuantityValue, config: &FieldConfig) -> Decimal {
    match config.display_decimal_places() {
        Some(places) => quantity.magnitude().round_dp(places, config.rounding_method()),
        None => quantity.magnitude().clone(),
    }
}

/// Render "magnitude symbol" with display rounding applied
pub fn format_display(quantity: &QuantityValue, config: &FieldConfig) -> String {
    let magnitude = display_magnitude(quantity, config);
    if quantity.unit().symbol.is_empty() {
        format!("{}", magnitude)
    } else {
        format!("{} {}", magnitude, quantity.unit().symbol)
    }
}
