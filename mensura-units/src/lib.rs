//! Mensura Units - Unit resolution and dimensional analysis
//!
//! The unit resolver consumed by the quantity core:
//! - `Dimension`: 7-exponent SI dimension vectors
//! - `Unit`: unit descriptors with base-unit conversion factors
//! - `UnitRegistry`: symbol/alias lookup, base units, custom registration
//! - `parse_unit` / `parse_quantity`: unit-expression and quantity-string
//!   parsing
//!
//! The registry is explicit state: callers construct one and pass shared
//! references into every resolution call. Lookups never mutate, so a
//! registry behind an `Arc` is safe for concurrent readers.

mod dimension;
mod parse;
mod registry;
mod unit;

pub use dimension::Dimension;
pub use parse::{parse_quantity, parse_unit};
pub use registry::UnitRegistry;
pub use unit::{ResolveError, Unit};
