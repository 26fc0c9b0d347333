//! Unit registry
//!
//! Maps symbols and aliases to unit descriptors and knows the base unit of
//! every dimension. The registry is plain data passed explicitly to every
//! canonicalize/convert call: hosts build (and optionally extend) one at
//! startup and hand out shared references. All lookups are read-only.
//!
//! Base units: meter, gram, second, ampere, kelvin, mole, candela. Note
//! the mass base is the gram, so mass-bearing derived units (N, J, Pa)
//! carry a factor of 1000 relative to their SI definitions.

use std::collections::HashMap;

use mensura_core::Decimal;

use crate::{Dimension, ResolveError, Unit};

/// Symbols of the per-dimension base units, in dimension-vector order
const BASE_SYMBOLS: [&str; 7] = ["m", "g", "s", "A", "K", "mol", "cd"];

/// Registry of known units
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl UnitRegistry {
    /// Empty registry (custom-unit hosts start here)
    pub fn empty() -> Self {
        UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Registry populated with the common SI and imperial units
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_mass_units();
        registry.register_length_units();
        registry.register_time_units();
        registry.register_temperature_units();
        registry.register_volume_units();
        registry.register_force_units();
        registry.register_energy_units();
        registry.register_pressure_units();
        registry
    }

    /// Resolve a symbol or alias to a unit descriptor
    pub fn resolve(&self, symbol: &str) -> Result<Unit, ResolveError> {
        self.get(symbol)
            .cloned()
            .ok_or_else(|| ResolveError::UnknownUnit(symbol.to_string()))
    }

    /// Look up a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        None
    }

    /// The base unit for a dimension
    ///
    /// Base dimensions map to their registered base unit; compound
    /// dimensions get a synthesized unit with factor 1 (e.g., "m*s^-1").
    pub fn base_unit_for(&self, dimension: Dimension) -> Unit {
        let mut parts = Vec::new();
        for (i, &exp) in dimension.exponents.iter().enumerate() {
            if exp == 1 {
                parts.push(BASE_SYMBOLS[i].to_string());
            } else if exp != 0 {
                parts.push(format!("{}^{}", BASE_SYMBOLS[i], exp));
            }
        }

        let symbol = if parts.is_empty() {
            String::new()
        } else {
            parts.join("*")
        };

        // A registered unit under the synthesized symbol wins (keeps the
        // full name for plain base units like "g")
        if let Some(unit) = self.units.get(&symbol) {
            return unit.clone();
        }

        let name = dimension
            .name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| symbol.clone());
        Unit::new(&symbol, &name, dimension, Decimal::from_i64(1))
    }

    /// Register a custom unit (host-side, before the registry is shared)
    pub fn register(&mut self, unit: Unit) {
        self.units.insert(unit.symbol.clone(), unit);
    }

    /// Register an alias for an existing symbol
    pub fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    /// All registered symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    // ========== Built-in unit tables ==========
    //
    // Factors in the tables are exact literals; the unwraps cannot fail.

    fn register_mass_units(&mut self) {
        self.register(Unit::new("g", "gram", Dimension::MASS, Decimal::from_i64(1)));
        self.register(Unit::new("mg", "milligram", Dimension::MASS, Decimal::from_str("0.001").unwrap()));
        self.register(Unit::new("ug", "microgram", Dimension::MASS, Decimal::from_str("0.000001").unwrap()));
        self.register(Unit::new("kg", "kilogram", Dimension::MASS, Decimal::from_i64(1000)));
        self.register(Unit::new("t", "tonne", Dimension::MASS, Decimal::from_i64(1_000_000)));
        self.register(Unit::new("lb", "pound", Dimension::MASS, Decimal::from_str("453.59237").unwrap()));
        self.register(Unit::new("oz", "ounce", Dimension::MASS, Decimal::from_str("28.349523125").unwrap()));
        self.register(Unit::new("st", "stone", Dimension::MASS, Decimal::from_str("6350.29318").unwrap()));

        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("milligram", "mg");
        self.alias("milligrams", "mg");
        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("tonne", "t");
        self.alias("tonnes", "t");
        self.alias("pound", "lb");
        self.alias("pounds", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("ounces", "oz");
        self.alias("stone", "st");
    }

    fn register_length_units(&mut self) {
        self.register(Unit::new("m", "meter", Dimension::LENGTH, Decimal::from_i64(1)));
        self.register(Unit::new("km", "kilometer", Dimension::LENGTH, Decimal::from_i64(1000)));
        self.register(Unit::new("cm", "centimeter", Dimension::LENGTH, Decimal::from_str("0.01").unwrap()));
        self.register(Unit::new("mm", "millimeter", Dimension::LENGTH, Decimal::from_str("0.001").unwrap()));
        self.register(Unit::new("um", "micrometer", Dimension::LENGTH, Decimal::from_str("0.000001").unwrap()));
        self.register(Unit::new("in", "inch", Dimension::LENGTH, Decimal::from_str("0.0254").unwrap()));
        self.register(Unit::new("ft", "foot", Dimension::LENGTH, Decimal::from_str("0.3048").unwrap()));
        self.register(Unit::new("yd", "yard", Dimension::LENGTH, Decimal::from_str("0.9144").unwrap()));
        self.register(Unit::new("mi", "mile", Dimension::LENGTH, Decimal::from_str("1609.344").unwrap()));

        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("metres", "m");
        self.alias("kilometer", "km");
        self.alias("kilometers", "km");
        self.alias("centimeter", "cm");
        self.alias("centimeters", "cm");
        self.alias("millimeter", "mm");
        self.alias("millimeters", "mm");
        self.alias("inch", "in");
        self.alias("inches", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("yard", "yd");
        self.alias("yards", "yd");
        self.alias("mile", "mi");
        self.alias("miles", "mi");
    }

    fn register_time_units(&mut self) {
        self.register(Unit::new("s", "second", Dimension::TIME, Decimal::from_i64(1)));
        self.register(Unit::new("ms", "millisecond", Dimension::TIME, Decimal::from_str("0.001").unwrap()));
        self.register(Unit::new("min", "minute", Dimension::TIME, Decimal::from_i64(60)));
        self.register(Unit::new("h", "hour", Dimension::TIME, Decimal::from_i64(3600)));
        self.register(Unit::new("d", "day", Dimension::TIME, Decimal::from_i64(86400)));

        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("day", "d");
        self.alias("days", "d");
    }

    fn register_temperature_units(&mut self) {
        self.register(Unit::new("K", "kelvin", Dimension::TEMPERATURE, Decimal::from_i64(1)));
        self.register(Unit::with_offset(
            "degC",
            "degree Celsius",
            Dimension::TEMPERATURE,
            Decimal::from_i64(1),
            Decimal::from_str("273.15").unwrap(),
        ));
        // degF -> K: (F + 459.67) * 5/9
        let five_ninths = Decimal::from_i64(5)
            .checked_div(&Decimal::from_i64(9))
            .unwrap();
        let f_offset = Decimal::from_str("459.67").unwrap().mul(&five_ninths);
        self.register(Unit::with_offset(
            "degF",
            "degree Fahrenheit",
            Dimension::TEMPERATURE,
            five_ninths,
            f_offset,
        ));

        self.alias("kelvin", "K");
        self.alias("celsius", "degC");
        self.alias("C", "degC");
        self.alias("fahrenheit", "degF");
        self.alias("F", "degF");
    }

    fn register_volume_units(&mut self) {
        self.register(Unit::new("m^3", "cubic meter", Dimension::VOLUME, Decimal::from_i64(1)));
        self.register(Unit::new("L", "liter", Dimension::VOLUME, Decimal::from_str("0.001").unwrap()));
        self.register(Unit::new("mL", "milliliter", Dimension::VOLUME, Decimal::from_str("0.000001").unwrap()));
        self.register(Unit::new("gal", "US gallon", Dimension::VOLUME, Decimal::from_str("0.003785411784").unwrap()));

        self.alias("liter", "L");
        self.alias("liters", "L");
        self.alias("litre", "L");
        self.alias("litres", "L");
        self.alias("milliliter", "mL");
        self.alias("milliliters", "mL");
        self.alias("gallon", "gal");
        self.alias("gallons", "gal");
    }

    fn register_force_units(&mut self) {
        self.register(Unit::new("N", "newton", Dimension::FORCE, Decimal::from_i64(1000)));
        self.register(Unit::new("kN", "kilonewton", Dimension::FORCE, Decimal::from_i64(1_000_000)));
        self.register(Unit::new("lbf", "pound-force", Dimension::FORCE, Decimal::from_str("4448.2216152605").unwrap()));

        self.alias("newton", "N");
        self.alias("newtons", "N");
    }

    fn register_energy_units(&mut self) {
        self.register(Unit::new("J", "joule", Dimension::ENERGY, Decimal::from_i64(1000)));
        self.register(Unit::new("kJ", "kilojoule", Dimension::ENERGY, Decimal::from_i64(1_000_000)));
        self.register(Unit::new("cal", "calorie", Dimension::ENERGY, Decimal::from_i64(4184)));
        self.register(Unit::new("kWh", "kilowatt hour", Dimension::ENERGY, Decimal::from_str("3600000000").unwrap()));

        self.alias("joule", "J");
        self.alias("joules", "J");
        self.alias("calorie", "cal");
        self.alias("calories", "cal");
    }

    fn register_pressure_units(&mut self) {
        self.register(Unit::new("Pa", "pascal", Dimension::PRESSURE, Decimal::from_i64(1000)));
        self.register(Unit::new("kPa", "kilopascal", Dimension::PRESSURE, Decimal::from_i64(1_000_000)));
        self.register(Unit::new("bar", "bar", Dimension::PRESSURE, Decimal::from_i64(100_000_000)));
        self.register(Unit::new("psi", "pound per square inch", Dimension::PRESSURE, Decimal::from_str("6894757.293168").unwrap()));

        self.alias("pascal", "Pa");
        self.alias("pascals", "Pa");
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_symbol() {
        let registry = UnitRegistry::new();
        let kg = registry.resolve("kg").unwrap();
        assert_eq!(kg.to_base_factor, Decimal::from_i64(1000));
    }

    #[test]
    fn test_resolve_alias() {
        let registry = UnitRegistry::new();
        let lb = registry.resolve("pounds").unwrap();
        assert_eq!(lb.symbol, "lb");
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = UnitRegistry::new();
        assert!(matches!(
            registry.resolve("smoot"),
            Err(ResolveError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_base_unit_for_mass_is_gram() {
        let registry = UnitRegistry::new();
        let base = registry.base_unit_for(Dimension::MASS);
        assert_eq!(base.symbol, "g");
        assert!(base.is_base());
    }

    #[test]
    fn test_base_unit_for_compound_dimension() {
        let registry = UnitRegistry::new();
        let base = registry.base_unit_for(Dimension::VELOCITY);
        assert_eq!(base.symbol, "m*s^-1");
        assert!(base.is_base());
    }

    #[test]
    fn test_custom_unit_registration() {
        let mut registry = UnitRegistry::new();
        registry.register(Unit::new(
            "smoot",
            "smoot",
            Dimension::LENGTH,
            Decimal::from_str("1.7018").unwrap(),
        ));
        registry.alias("smoots", "smoot");

        let smoot = registry.resolve("smoots").unwrap();
        assert_eq!(smoot.to_base(&Decimal::from_i64(2)), Decimal::from_str("3.4036").unwrap());
    }

    #[test]
    fn test_fahrenheit_to_kelvin() {
        use mensura_core::RoundingMode;

        let registry = UnitRegistry::new();
        let f = registry.resolve("degF").unwrap();
        // 32 degF = 273.15 K, up to the rounding of the 5/9 factor
        let base = f.to_base(&Decimal::from_i64(32));
        assert_eq!(
            base.round_dp(10, RoundingMode::HalfEven),
            Decimal::from_str("273.15").unwrap()
        );
    }
}
