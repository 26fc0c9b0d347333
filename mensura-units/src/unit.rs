//! Unit descriptors
//!
//! A unit is a named scale for one dimension, carrying the factor (and,
//! for thermometric scales, the offset) that maps a value expressed in it
//! to the dimension's base unit. The base unit per dimension is fixed by
//! the registry (gram for mass, meter for length, second for time, ...).

use std::fmt;

use mensura_core::{Decimal, DecimalError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Dimension;

/// Errors reported by the unit resolver
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// A unit symbol could not be mapped to a known unit
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// An operation was attempted across incompatible dimensions
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// An offset unit (Celsius, Fahrenheit) has no pure conversion factor
    #[error("offset unit {0} has no proportional conversion factor")]
    OffsetUnit(String),

    /// Numeric failure during conversion
    #[error("numeric error: {0}")]
    Number(#[from] DecimalError),
}

/// A unit of measure with its conversion to the dimension's base unit
///
/// base_value = value * to_base_factor + to_base_offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Symbol used in storage and display (e.g., "g", "km", "lb")
    pub symbol: String,
    /// Full name (e.g., "gram", "kilometer", "pound")
    pub name: String,
    /// Dimensional signature
    pub dimension: Dimension,
    /// Proportional factor to the base unit
    pub to_base_factor: Decimal,
    /// Additive offset to the base unit (non-zero only for thermometric scales)
    pub to_base_offset: Decimal,
}

impl Unit {
    /// Create a proportional unit (no offset)
    pub fn new(symbol: &str, name: &str, dimension: Dimension, to_base_factor: Decimal) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_base_factor,
            to_base_offset: Decimal::zero(),
        }
    }

    /// Create a unit with an additive offset
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_base_factor: Decimal,
        to_base_offset: Decimal,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_base_factor,
            to_base_offset,
        }
    }

    /// Check if this is the base unit of its dimension
    pub fn is_base(&self) -> bool {
        self.to_base_factor == Decimal::from_i64(1) && self.to_base_offset.is_zero()
    }

    /// Check if this unit converts with an offset
    pub fn has_offset(&self) -> bool {
        !self.to_base_offset.is_zero()
    }

    /// Check dimensional compatibility (whether conversion is possible)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value expressed in this unit to the base unit
    pub fn to_base(&self, value: &Decimal) -> Decimal {
        value.mul(&self.to_base_factor).add(&self.to_base_offset)
    }

    /// Convert a base-unit value into this unit
    pub fn from_base(&self, base_value: &Decimal) -> Result<Decimal, DecimalError> {
        let shifted = base_value.sub(&self.to_base_offset);
        shifted.checked_div(&self.to_base_factor)
    }

    /// Convert a value from this unit to another compatible unit
    pub fn convert_value(&self, value: &Decimal, target: &Unit) -> Result<Decimal, ResolveError> {
        if !self.is_compatible(target) {
            return Err(ResolveError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        let base = self.to_base(value);
        target.from_base(&base).map_err(ResolveError::Number)
    }

    /// Pure conversion factor to a compatible proportional unit
    ///
    /// Only defined when neither unit carries an offset; thermometric
    /// conversions need `convert_value`.
    pub fn conversion_factor(&self, target: &Unit) -> Result<Decimal, ResolveError> {
        if !self.is_compatible(target) {
            return Err(ResolveError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }
        if self.has_offset() {
            return Err(ResolveError::OffsetUnit(self.symbol.clone()));
        }
        if target.has_offset() {
            return Err(ResolveError::OffsetUnit(target.symbol.clone()));
        }

        self.to_base_factor
            .checked_div(&target.to_base_factor)
            .map_err(ResolveError::Number)
    }

    /// Multiply two units (e.g., g * m)
    pub fn multiply(&self, other: &Unit) -> Unit {
        Unit {
            symbol: format!("{}*{}", self.symbol, other.symbol),
            name: format!("{} {}", self.name, other.name),
            dimension: self.dimension.multiply(&other.dimension),
            to_base_factor: self.to_base_factor.mul(&other.to_base_factor),
            // Offsets do not survive unit algebra
            to_base_offset: Decimal::zero(),
        }
    }

    /// Divide two units (e.g., m / s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, DecimalError> {
        let factor = self.to_base_factor.checked_div(&other.to_base_factor)?;

        Ok(Unit {
            symbol: format!("{}/{}", self.symbol, other.symbol),
            name: format!("{} per {}", self.name, other.name),
            dimension: self.dimension.divide(&other.dimension),
            to_base_factor: factor,
            to_base_offset: Decimal::zero(),
        })
    }

    /// Raise a unit to an integer power (e.g., m^2 for variance results)
    pub fn power(&self, exp: i32) -> Unit {
        let symbol = if exp == 1 {
            self.symbol.clone()
        } else {
            format!("{}^{}", self.symbol, exp)
        };

        Unit {
            symbol,
            name: format!("{}^{}", self.name, exp),
            dimension: self.dimension.power(exp),
            to_base_factor: self.to_base_factor.pow(exp),
            to_base_offset: Decimal::zero(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
