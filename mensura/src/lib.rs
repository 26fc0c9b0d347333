//! Mensura - Composite physical-quantity storage core
//!
//! A quantity is stored as three linked components:
//! - `magnitude`: the number the caller supplied, in their unit
//! - `units`: the unit symbol the magnitude is expressed in
//! - `comparator`: the magnitude converted to the dimension's base unit
//!
//! The comparator makes heterogeneous-unit data comparable with plain
//! decimal comparisons: 300 gram and 2 kilogram become 300 and 2000, and
//! ordering, filtering and aggregation all operate on that column alone.
//! The display magnitude and unit are preserved untouched, so a value
//! always reads back exactly as it was entered.
//!
//! Layers:
//! - [`config`]: per-field coercion policy (default unit, numeric kind,
//!   digit capacity, display rounding)
//! - [`input`]: the closed union of accepted caller inputs
//! - [`convert`]: canonicalization and unit conversion
//! - [`codec`]: the persisted three-column record
//! - [`query`]: comparator-space predicates
//! - [`aggregate`]: comparator-space aggregation
//! - [`indexing`]: index guidance for the comparator column
//!
//! ```
//! use mensura::{canonicalize, FieldConfig, QuantityInput};
//! use mensura_core::Decimal;
//! use mensura_units::UnitRegistry;
//!
//! let registry = UnitRegistry::new();
//! let weight = FieldConfig::new(registry.resolve("g")?);
//!
//! let q = canonicalize(QuantityInput::from("2 kg"), &weight, &registry)?;
//! assert_eq!(*q.magnitude(), Decimal::from_i64(2));
//! assert_eq!(*q.comparator(), Decimal::from_i64(2000));
//! # Ok::<(), mensura::QuantityError>(())
//! ```

pub mod aggregate;
pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod indexing;
pub mod input;
pub mod quantity;
pub mod query;

pub use aggregate::{aggregate, Accumulator, AggregateKind, Aggregated};
pub use codec::{decode, encode, CompositeRecord};
pub use config::{FieldConfig, NumericKind};
pub use convert::{canonicalize, display_magnitude, format_display};
pub use error::QuantityError;
pub use input::QuantityInput;
pub use quantity::QuantityValue;
pub use query::{build_predicate, CompareOp, Lookup, Operand, Predicate};
