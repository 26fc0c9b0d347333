//! Display rounding for decimals
//!
//! The eight rounding methods of a standard decimal context, applied at a
//! fixed number of decimal places. Rounding is a display-boundary concern:
//! stored values always keep full working precision.

use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

/// How to resolve a digit that falls outside the kept decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Toward positive infinity
    Ceiling,
    /// Toward negative infinity
    Floor,
    /// Toward zero (truncate)
    Down,
    /// Away from zero whenever any digit is dropped
    Up,
    /// Nearest neighbour, ties away from zero
    HalfUp,
    /// Nearest neighbour, ties toward zero
    HalfDown,
    /// Nearest neighbour, ties to the even digit (bankers' rounding)
    HalfEven,
    /// Toward zero, unless the truncated result would end in 0 or 5,
    /// in which case away from zero
    ZeroFiveUp,
}

impl RoundingMode {
    /// Parse a rounding method name as found in field configuration
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ceiling" => Some(Self::Ceiling),
            "floor" => Some(Self::Floor),
            "down" => Some(Self::Down),
            "up" => Some(Self::Up),
            "half_up" => Some(Self::HalfUp),
            "half_down" => Some(Self::HalfDown),
            "half_even" => Some(Self::HalfEven),
            "05up" => Some(Self::ZeroFiveUp),
            _ => None,
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        Self::HalfEven
    }
}

impl Decimal {
    /// Round to `places` decimal places with the given mode
    ///
    /// Scaling by a power of ten and back is exact in decimal arithmetic,
    /// so the only inexactness introduced is the rounding itself.
    pub fn round_dp(&self, places: u32, mode: RoundingMode) -> Decimal {
        let scale = Decimal::pow10(places as i32);
        let scaled = self.mul(&scale);
        let rounded = round_to_integer(&scaled, mode);
        rounded.mul(&Decimal::pow10(-(places as i32)))
    }
}

/// Round a decimal to an integer value per the mode
fn round_to_integer(x: &Decimal, mode: RoundingMode) -> Decimal {
    match mode {
        RoundingMode::Ceiling => x.ceil(),
        RoundingMode::Floor => x.floor(),
        _ => {
            // The remaining modes are sign-symmetric: round the absolute
            // value, then restore the sign
            let negative = x.is_negative();
            let a = x.abs();
            let truncated = a.floor();
            let frac = a.sub(&truncated);
            let half = Decimal::from_str("0.5").unwrap_or(Decimal::zero());

            let bump = match mode {
                RoundingMode::Down => false,
                RoundingMode::Up => !frac.is_zero(),
                RoundingMode::HalfUp => frac >= half,
                RoundingMode::HalfDown => frac > half,
                RoundingMode::HalfEven => {
                    frac > half || (frac == half && is_odd(&truncated))
                }
                RoundingMode::ZeroFiveUp => {
                    !frac.is_zero() && {
                        let last = last_digit(&truncated);
                        last == Decimal::zero() || last == Decimal::from_i64(5)
                    }
                }
                RoundingMode::Ceiling | RoundingMode::Floor => unreachable!(),
            };

            let r = if bump {
                truncated.add(&Decimal::from_i64(1))
            } else {
                truncated
            };
            if negative {
                r.neg()
            } else {
                r
            }
        }
    }
}

/// Parity of a non-negative integer-valued decimal
///
/// Derived from the last decimal digit: shifting by powers of ten is
/// exact at any precision, whereas halving can need one digit more than
/// the value carries.
fn is_odd(t: &Decimal) -> bool {
    matches!(last_digit(t).to_i64(), Some(d) if d % 2 == 1)
}

/// Last decimal digit of a non-negative integer-valued decimal
fn last_digit(t: &Decimal) -> Decimal {
    let ten = Decimal::from_i64(10);
    let tens = match t.checked_div(&ten) {
        Ok(q) => q.floor(),
        Err(_) => return Decimal::zero(),
    };
    t.sub(&tens.mul(&ten))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_half_up() {
        assert_eq!(dec("28.785").round_dp(2, RoundingMode::HalfUp), dec("28.79"));
        assert_eq!(dec("2.5").round_dp(0, RoundingMode::HalfUp), dec("3"));
        assert_eq!(dec("-2.5").round_dp(0, RoundingMode::HalfUp), dec("-3"));
    }

    #[test]
    fn test_half_down() {
        assert_eq!(dec("2.5").round_dp(0, RoundingMode::HalfDown), dec("2"));
        assert_eq!(dec("2.51").round_dp(0, RoundingMode::HalfDown), dec("3"));
        assert_eq!(dec("-2.5").round_dp(0, RoundingMode::HalfDown), dec("-2"));
    }

    #[test]
    fn test_half_even() {
        assert_eq!(dec("2.5").round_dp(0, RoundingMode::HalfEven), dec("2"));
        assert_eq!(dec("3.5").round_dp(0, RoundingMode::HalfEven), dec("4"));
        assert_eq!(dec("2.675").round_dp(2, RoundingMode::HalfEven), dec("2.68"));
        assert_eq!(dec("2.665").round_dp(2, RoundingMode::HalfEven), dec("2.66"));
    }

    #[test]
    fn test_half_even_tie_at_precision_ceiling() {
        // 28-digit truncations: parity must be read off the last digit,
        // not inferred through a halving that would need a 29th digit
        let odd = dec("1234567890123456789012345677.5");
        assert_eq!(
            odd.round_dp(0, RoundingMode::HalfEven),
            dec("1234567890123456789012345678")
        );
        let even = dec("1234567890123456789012345678.5");
        assert_eq!(
            even.round_dp(0, RoundingMode::HalfEven),
            dec("1234567890123456789012345678")
        );
    }

    #[test]
    fn test_ceiling_floor() {
        assert_eq!(dec("2.1").round_dp(0, RoundingMode::Ceiling), dec("3"));
        assert_eq!(dec("-2.1").round_dp(0, RoundingMode::Ceiling), dec("-2"));
        assert_eq!(dec("2.9").round_dp(0, RoundingMode::Floor), dec("2"));
        assert_eq!(dec("-2.1").round_dp(0, RoundingMode::Floor), dec("-3"));
    }

    #[test]
    fn test_down_up() {
        assert_eq!(dec("2.99").round_dp(0, RoundingMode::Down), dec("2"));
        assert_eq!(dec("-2.99").round_dp(0, RoundingMode::Down), dec("-2"));
        assert_eq!(dec("2.01").round_dp(0, RoundingMode::Up), dec("3"));
        assert_eq!(dec("-2.01").round_dp(0, RoundingMode::Up), dec("-3"));
    }

    #[test]
    fn test_zero_five_up() {
        // Truncation ends in 0 or 5 -> round away from zero
        assert_eq!(dec("1.501").round_dp(1, RoundingMode::ZeroFiveUp), dec("1.6"));
        assert_eq!(dec("1.001").round_dp(1, RoundingMode::ZeroFiveUp), dec("1.1"));
        // Otherwise truncate
        assert_eq!(dec("1.399").round_dp(1, RoundingMode::ZeroFiveUp), dec("1.3"));
    }

    #[test]
    fn test_round_exact_value_is_identity() {
        assert_eq!(dec("28.79").round_dp(2, RoundingMode::HalfUp), dec("28.79"));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(RoundingMode::from_name("half_even"), Some(RoundingMode::HalfEven));
        assert_eq!(RoundingMode::from_name("05up"), Some(RoundingMode::ZeroFiveUp));
        assert_eq!(RoundingMode::from_name("nearest"), None);
    }

    #[test]
    fn test_places_two() {
        let long = dec("28.7882182843549");
        assert_eq!(long.round_dp(2, RoundingMode::HalfUp), dec("28.79"));
        assert_eq!(long.round_dp(2, RoundingMode::Down), dec("28.78"));
    }
}
