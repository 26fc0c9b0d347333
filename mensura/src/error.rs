//! Error taxonomy for the quantity core
//!
//! Every failure here is a recoverable, typed value the caller can branch
//! on; nothing in the core panics on bad input. Variants carry the
//! offending symbols and dimensions so hosts can render user-facing
//! messages without string-parsing the error.

use mensura_core::DecimalError;
use mensura_units::{Dimension, ResolveError};
use thiserror::Error;

/// Typed failures surfaced by canonicalization, conversion, codec, query
/// construction, and aggregation
#[derive(Debug, Clone, Error)]
pub enum QuantityError {
    /// A unit string could not be mapped to a known unit
    #[error("unresolved unit: {symbol}")]
    UnresolvedUnit { symbol: String },

    /// An operation was attempted across dimensionally incompatible units
    #[error("incompatible dimensions: {from} ({from_dim}) vs {to} ({to_dim})")]
    IncompatibleDimension {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    /// A lookup kind is not meaningful for quantity values
    #[error("unsupported lookup '{lookup}': {reason}")]
    UnsupportedLookup { lookup: String, reason: String },

    /// A magnitude exceeds the field's configured numeric capacity
    #[error("precision overflow: {detail}")]
    PrecisionOverflow { detail: String },

    /// An aggregation that needs at least one value saw an empty collection
    #[error("empty aggregation: {kind} requires at least one non-null value")]
    EmptyAggregation { kind: String },

    /// Structural validation failed while decoding a composite record
    #[error("malformed composite record: {detail}")]
    MalformedComposite { detail: String },

    /// Numeric failure during decimal arithmetic
    #[error("numeric error: {0}")]
    Number(#[from] DecimalError),
}

impl From<ResolveError> for QuantityError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::UnknownUnit(symbol) => QuantityError::UnresolvedUnit { symbol },
            ResolveError::IncompatibleDimensions {
                from,
                to,
                from_dim,
                to_dim,
            } => QuantityError::IncompatibleDimension {
                from,
                to,
                from_dim,
                to_dim,
            },
            ResolveError::OffsetUnit(symbol) => QuantityError::Number(DecimalError::Domain(
                format!("offset unit {} has no proportional conversion factor", symbol),
            )),
            ResolveError::Number(e) => QuantityError::Number(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_error_mapping() {
        let err: QuantityError = ResolveError::UnknownUnit("smoot".to_string()).into();
        assert!(matches!(err, QuantityError::UnresolvedUnit { symbol } if symbol == "smoot"));
    }

    #[test]
    fn test_display_has_context() {
        let err = QuantityError::IncompatibleDimension {
            from: "m".to_string(),
            to: "g".to_string(),
            from_dim: Dimension::LENGTH,
            to_dim: Dimension::MASS,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("m"));
        assert!(msg.contains("incompatible"));
    }
}
