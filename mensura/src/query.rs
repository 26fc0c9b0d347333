//! Comparator-space query predicates
//!
//! Lookup names are parsed into a closed set of predicate kinds. Operands
//! are canonicalized into the field's base unit before the predicate is
//! built, so every comparison is a plain decimal comparison on the stored
//! comparator column - "300 gram > 2 kilogram" needs no unit logic in the
//! storage engine. String-oriented and date-decomposition lookups are
//! rejected at construction time, before any data access.

use mensura_core::Decimal;
use mensura_units::UnitRegistry;

use crate::config::FieldConfig;
use crate::convert::canonicalize;
use crate::error::QuantityError;
use crate::input::QuantityInput;
use crate::quantity::QuantityValue;

/// The comparison operators meaningful for quantity columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// The predicate kinds a quantity column supports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Compare(CompareOp),
    Range,
    IsNull,
}

/// Lookups that exist in query languages but are meaningless for
/// quantities; each fails fast with a reason
const STRING_LOOKUPS: &[&str] = &[
    "contains",
    "icontains",
    "startswith",
    "istartswith",
    "endswith",
    "iendswith",
    "iexact",
    "regex",
    "iregex",
    "search",
];

const DATE_LOOKUPS: &[&str] = &[
    "year", "month", "day", "hour", "minute", "second", "week", "week_day", "quarter", "date",
    "time",
];

impl Lookup {
    /// Parse a lookup name, rejecting unsupported kinds with a typed error
    pub fn parse(name: &str) -> Result<Lookup, QuantityError> {
        match name {
            "exact" | "eq" => Ok(Lookup::Compare(CompareOp::Eq)),
            "ne" => Ok(Lookup::Compare(CompareOp::Ne)),
            "gt" => Ok(Lookup::Compare(CompareOp::Gt)),
            "gte" => Ok(Lookup::Compare(CompareOp::Gte)),
            "lt" => Ok(Lookup::Compare(CompareOp::Lt)),
            "lte" => Ok(Lookup::Compare(CompareOp::Lte)),
            "range" => Ok(Lookup::Range),
            "isnull" => Ok(Lookup::IsNull),
            _ if STRING_LOOKUPS.contains(&name) => Err(QuantityError::UnsupportedLookup {
                lookup: name.to_string(),
                reason: "string matching is meaningless for quantity values".to_string(),
            }),
            _ if DATE_LOOKUPS.contains(&name) => Err(QuantityError::UnsupportedLookup {
                lookup: name.to_string(),
                reason: "date decomposition is meaningless for quantity values".to_string(),
            }),
            _ => Err(QuantityError::UnsupportedLookup {
                lookup: name.to_string(),
                reason: "unknown lookup".to_string(),
            }),
        }
    }
}

/// Operands supplied alongside a lookup
#[derive(Debug, Clone)]
pub enum Operand {
    /// One quantity (comparison lookups)
    Single(QuantityInput),
    /// Inclusive bounds (range lookup)
    Bounds(QuantityInput, QuantityInput),
    /// Expected nullness (isnull lookup)
    Null(bool),
}

/// A comparator-space predicate, ready for the storage layer
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Compare the comparator column against a base-unit decimal
    Compare { op: CompareOp, comparator: Decimal },
    /// Inclusive comparator range
    Between { low: Decimal, high: Decimal },
    /// Null check on the whole composite
    IsNull { expected: bool },
}

/// Build a predicate from a lookup name and operands
///
/// Each quantity operand is canonicalized against the field, which both
/// validates its dimension and expresses it in the base unit the
/// comparator column stores.
pub fn build_predicate(
    lookup: &str,
    operand: Operand,
    config: &FieldConfig,
    registry: &UnitRegistry,
) -> Result<Predicate, QuantityError> {
    let kind = Lookup::parse(lookup)?;

    match (kind, operand) {
        (Lookup::Compare(op), Operand::Single(input)) => {
            let rhs = canonicalize(input, config, registry)?;
            Ok(Predicate::Compare {
                op,
                comparator: rhs.comparator().clone(),
            })
        }
        (Lookup::Range, Operand::Bounds(low, high)) => {
            let low = canonicalize(low, config, registry)?;
            let high = canonicalize(high, config, registry)?;
            Ok(Predicate::Between {
                low: low.comparator().clone(),
                high: high.comparator().clone(),
            })
        }
        (Lookup::IsNull, Operand::Null(expected)) => Ok(Predicate::IsNull { expected }),
        (_, _) => Err(QuantityError::UnsupportedLookup {
            lookup: lookup.to_string(),
            reason: "operand shape does not match the lookup".to_string(),
        }),
    }
}

impl Predicate {
    /// Evaluate against a stored (possibly null) quantity
    ///
    /// This is the in-memory reference semantics of the predicate; storage
    /// engines translate `Compare`/`Between` into comparisons on the
    /// indexed comparator column.
    pub fn matches(&self, stored: Option<&QuantityValue>) -> bool {
        match self {
            Predicate::IsNull { expected } => stored.is_none() == *expected,
            Predicate::Compare { op, comparator } => match stored {
                None => false,
                Some(q) => {
                    let lhs = q.comparator();
                    match op {
                        CompareOp::Eq => lhs == comparator,
                        CompareOp::Ne => lhs != comparator,
                        CompareOp::Gt => lhs > comparator,
                        CompareOp::Gte => lhs >= comparator,
                        CompareOp::Lt => lhs < comparator,
                        CompareOp::Lte => lhs <= comparator,
                    }
                }
            },
            Predicate::Between { low, high } => match stored {
                None => false,
                Some(q) => q.comparator() >= low && q.comparator() <= high,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_core::Decimal;

    fn registry() -> UnitRegistry {
        UnitRegistry::new()
    }

    fn mass_field(registry: &UnitRegistry) -> FieldConfig {
        FieldConfig::new(registry.resolve("g").unwrap())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn stored(magnitude: &str, unit: &str, registry: &UnitRegistry) -> QuantityValue {
        let config = FieldConfig::new(registry.resolve(unit).unwrap());
        canonicalize(
            QuantityInput::Pair(dec(magnitude), unit.to_string()),
            &config,
            registry,
        )
        .unwrap()
    }

    #[test]
    fn test_gt_across_units() {
        let registry = registry();
        let config = mass_field(&registry);

        // stored > 2 kilogram?
        let predicate = build_predicate(
            "gt",
            Operand::Single(QuantityInput::Pair(dec("2"), "kilogram".to_string())),
            &config,
            &registry,
        )
        .unwrap();

        // 300 g is not > 2 kg
        let grams = stored("300", "g", &registry);
        assert!(!predicate.matches(Some(&grams)));

        // 3 kg is
        let kilos = stored("3", "kg", &registry);
        assert!(predicate.matches(Some(&kilos)));
    }

    #[test]
    fn test_exact_across_units() {
        let registry = registry();
        let config = mass_field(&registry);

        let predicate = build_predicate(
            "exact",
            Operand::Single(QuantityInput::Pair(dec("1"), "kg".to_string())),
            &config,
            &registry,
        )
        .unwrap();

        assert!(predicate.matches(Some(&stored("1000", "g", &registry))));
        assert!(!predicate.matches(Some(&stored("999", "g", &registry))));
    }

    #[test]
    fn test_range_inclusive() {
        let registry = registry();
        let config = mass_field(&registry);

        let predicate = build_predicate(
            "range",
            Operand::Bounds(
                QuantityInput::Pair(dec("500"), "g".to_string()),
                QuantityInput::Pair(dec("2"), "kg".to_string()),
            ),
            &config,
            &registry,
        )
        .unwrap();

        assert!(predicate.matches(Some(&stored("500", "g", &registry))));
        assert!(predicate.matches(Some(&stored("2", "kg", &registry))));
        assert!(predicate.matches(Some(&stored("1", "kg", &registry))));
        assert!(!predicate.matches(Some(&stored("499", "g", &registry))));
        assert!(!predicate.matches(None));
    }

    #[test]
    fn test_isnull() {
        let registry = registry();
        let config = mass_field(&registry);

        let is_null = build_predicate("isnull", Operand::Null(true), &config, &registry).unwrap();
        let not_null = build_predicate("isnull", Operand::Null(false), &config, &registry).unwrap();

        assert!(is_null.matches(None));
        assert!(!is_null.matches(Some(&stored("0", "g", &registry))));
        assert!(not_null.matches(Some(&stored("0", "g", &registry))));
    }

    #[test]
    fn test_string_lookup_rejected_at_construction() {
        let registry = registry();
        let config = mass_field(&registry);

        for name in ["contains", "startswith", "iendswith", "regex", "search"] {
            let result = build_predicate(
                name,
                Operand::Single(QuantityInput::Pair(dec("1"), "g".to_string())),
                &config,
                &registry,
            );
            assert!(
                matches!(result, Err(QuantityError::UnsupportedLookup { .. })),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_date_lookup_rejected_at_construction() {
        let registry = registry();
        let config = mass_field(&registry);

        for name in ["year", "month", "quarter", "week_day"] {
            let result = build_predicate(
                name,
                Operand::Single(QuantityInput::Pair(dec("1"), "g".to_string())),
                &config,
                &registry,
            );
            assert!(matches!(result, Err(QuantityError::UnsupportedLookup { .. })));
        }
    }

    #[test]
    fn test_wrong_dimension_operand_rejected() {
        let registry = registry();
        let config = mass_field(&registry);

        let result = build_predicate(
            "gt",
            Operand::Single(QuantityInput::Pair(dec("1"), "m".to_string())),
            &config,
            &registry,
        );
        assert!(matches!(
            result,
            Err(QuantityError::IncompatibleDimension { .. })
        ));
    }

    #[test]
    fn test_operand_shape_mismatch() {
        let registry = registry();
        let config = mass_field(&registry);

        let result = build_predicate("range", Operand::Null(true), &config, &registry);
        assert!(matches!(result, Err(QuantityError::UnsupportedLookup { .. })));
    }
}
