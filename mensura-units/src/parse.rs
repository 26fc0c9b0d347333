//! Unit expression parsing
//!
//! Resolves strings like "kg", "m^2", "kg*m/s^2" against a registry, and
//! splits quantity strings like "2.5 pound" into (magnitude, unit).

use mensura_core::Decimal;

use crate::{Dimension, ResolveError, Unit, UnitRegistry};

fn dimensionless() -> Unit {
    Unit::new("", "dimensionless", Dimension::DIMENSIONLESS, Decimal::from_i64(1))
}

/// Largest exponent magnitude accepted in a unit expression; no physical
/// unit needs more, and the cap bounds the factor computation
const MAX_EXPONENT: u32 = 9;

/// Parse a unit expression
///
/// Supported forms:
/// - Simple: "m", "kg", "pound"
/// - Powers: "m^2", "s^-1"
/// - Products: "kg*m"
/// - Quotients: "m/s", "kg/m^2"
/// - Combined: "kg*m/s^2"
pub fn parse_unit(registry: &UnitRegistry, s: &str) -> Result<Unit, ResolveError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(dimensionless());
    }

    if let Some(unit) = registry.get(s) {
        return Ok(unit.clone());
    }

    parse_quotient(registry, s)
}

/// Parse "numerator/denominator"
fn parse_quotient(registry: &UnitRegistry, s: &str) -> Result<Unit, ResolveError> {
    let parts: Vec<&str> = s.splitn(2, '/').collect();

    let numerator = parse_product(registry, parts[0])?;

    if parts.len() == 1 {
        return Ok(numerator);
    }

    let denominator = parse_product(registry, parts[1])?;
    numerator
        .divide(&denominator)
        .map_err(ResolveError::Number)
}

/// Parse a product of powered units like "kg*m^2"
fn parse_product(registry: &UnitRegistry, s: &str) -> Result<Unit, ResolveError> {
    let factors: Vec<&str> = s
        .trim()
        .split(|c| c == '*' || c == '·')
        .filter(|p| !p.trim().is_empty())
        .collect();

    if factors.is_empty() {
        return Ok(dimensionless());
    }

    let mut result = parse_power(registry, factors[0])?;
    for factor in &factors[1..] {
        let unit = parse_power(registry, factor)?;
        result = result.multiply(&unit);
    }

    Ok(result)
}

/// Parse a unit with an optional exponent like "m^2" or "s^-1"
fn parse_power(registry: &UnitRegistry, s: &str) -> Result<Unit, ResolveError> {
    let s = s.trim();

    if let Some(caret_pos) = s.find('^') {
        let base = &s[..caret_pos];
        let exp_str = &s[caret_pos + 1..];

        let base_unit = lookup(registry, base)?;
        let exponent: i32 = exp_str
            .parse()
            .map_err(|_| ResolveError::UnknownUnit(format!("invalid exponent: {}", exp_str)))?;
        if exponent.unsigned_abs() > MAX_EXPONENT {
            return Err(ResolveError::UnknownUnit(format!(
                "exponent out of range: {}",
                exp_str
            )));
        }

        return Ok(base_unit.power(exponent));
    }

    lookup(registry, s)
}

fn lookup(registry: &UnitRegistry, s: &str) -> Result<Unit, ResolveError> {
    let s = s.trim();

    if s == "1" || s.is_empty() {
        return Ok(dimensionless());
    }

    registry
        .get(s)
        .cloned()
        .ok_or_else(|| ResolveError::UnknownUnit(s.to_string()))
}

/// Parse a quantity string like "2.5 pound" or "300g"
pub fn parse_quantity(registry: &UnitRegistry, s: &str) -> Result<(Decimal, Unit), ResolveError> {
    let s = s.trim();

    // Scan past the leading number
    let mut split_pos = 0;
    let mut found_digit = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || c == 'e' || c == 'E' {
            found_digit = true;
            split_pos = i + c.len_utf8();
        } else if found_digit {
            split_pos = i;
            break;
        }
    }

    if !found_digit {
        return Err(ResolveError::UnknownUnit(format!("no number found in: {}", s)));
    }

    let num_str = s[..split_pos].trim();
    let unit_str = s[split_pos..].trim();

    let value = Decimal::from_str(num_str)
        .map_err(|_| ResolveError::UnknownUnit(format!("invalid number: {}", num_str)))?;

    let unit = if unit_str.is_empty() {
        dimensionless()
    } else {
        parse_unit(registry, unit_str)?
    };

    Ok((value, unit))
}
