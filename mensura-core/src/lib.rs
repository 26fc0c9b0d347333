//! Mensura Core - Fundamental numeric types
//!
//! This crate provides the numeric foundation for Mensura:
//! - `Decimal`: arbitrary precision decimal numbers
//! - `RoundingMode`: the eight display-rounding methods
//! - `DecimalError`: typed numeric failures

mod decimal;
mod rounding;

pub use decimal::{Decimal, DecimalError, DEFAULT_PRECISION};
pub use rounding::RoundingMode;
