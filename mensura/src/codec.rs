//! Composite record codec
//!
//! The storage representation is a three-column record (comparator,
//! magnitude, units). All three are nullable only together: a quantity is
//! either wholly present or wholly null. Encoding is a pure projection of
//! an already-canonical value; decoding re-validates that the unit string
//! still resolves and matches the field's dimension, and can optionally
//! re-derive the comparator to detect tampered or stale rows.

use mensura_core::Decimal;
use mensura_units::{parse_unit, UnitRegistry};
use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;
use crate::error::QuantityError;
use crate::quantity::QuantityValue;

/// The persisted three-column layout
///
/// Decimals serialize as exact decimal strings, so a record survives any
/// textual transport bit-exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub comparator: Option<Decimal>,
    pub magnitude: Option<Decimal>,
    pub units: Option<String>,
}

impl CompositeRecord {
    /// The all-null record (a null quantity)
    pub fn null() -> Self {
        CompositeRecord {
            comparator: None,
            magnitude: None,
            units: None,
        }
    }

    /// Whether the record is wholly null
    pub fn is_null(&self) -> bool {
        self.comparator.is_none() && self.magnitude.is_none() && self.units.is_none()
    }
}

/// Project a quantity (or null) onto the storage layout
///
/// No conversion happens here; the value is already canonical.
pub fn encode(quantity: Option<&QuantityValue>) -> CompositeRecord {
    match quantity {
        None => CompositeRecord::null(),
        Some(q) => CompositeRecord {
            comparator: Some(q.comparator().clone()),
            magnitude: Some(q.magnitude().clone()),
            units: Some(q.unit().symbol.clone()),
        },
    }
}

/// Rebuild a quantity from a stored record
///
/// The persisted comparator is trusted (not re-derived) unless `strict` is
/// set, in which case any mismatch between the stored comparator and the
/// one derived from magnitude and unit fails the decode. Under pure decimal
/// arithmetic the tolerance is exact zero.
pub fn decode(
    record: &CompositeRecord,
    config: &FieldConfig,
    registry: &UnitRegistry,
    strict: bool,
) -> Result<Option<QuantityValue>, QuantityError> {
    if record.is_null() {
        return Ok(None);
    }

    let (comparator, magnitude, symbol) =
        match (&record.comparator, &record.magnitude, &record.units) {
            (Some(c), Some(m), Some(u)) => (c, m, u),
            _ => {
                return Err(QuantityError::MalformedComposite {
                    detail: format!(
                        "columns must be null together: comparator {}, magnitude {}, units {}",
                        presence(record.comparator.is_some()),
                        presence(record.magnitude.is_some()),
                        presence(record.units.is_some()),
                    ),
                })
            }
        };

    // The unit string must still resolve; a reconfigured registry must not
    // silently coerce old rows
    let unit = parse_unit(registry, symbol).map_err(|_| QuantityError::UnresolvedUnit {
        symbol: symbol.clone(),
    })?;

    if unit.dimension != config.dimension() {
        return Err(QuantityError::IncompatibleDimension {
            from: unit.symbol.clone(),
            to: config.default_unit().symbol.clone(),
            from_dim: unit.dimension,
            to_dim: config.dimension(),
        });
    }

    if strict {
        let derived = unit.to_base(magnitude);
        if derived != *comparator {
            return Err(QuantityError::MalformedComposite {
                detail: format!(
                    "stored comparator {} does not match derived {} for {} {}",
                    comparator, derived, magnitude, unit.symbol
                ),
            });
        }
    }

    Ok(Some(QuantityValue::from_parts(
        magnitude.clone(),
        unit,
        comparator.clone(),
    )))
}

fn presence(present: bool) -> &'static str {
    if present {
        "present"
    } else {
        "null"
    }
}
