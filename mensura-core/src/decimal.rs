//! Arbitrary precision decimals using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic, so
//! magnitudes and comparators survive storage round-trips without binary
//! floating point drift.

use dashu_float::ops::{Abs, SquareRoot};
use dashu_float::DBig;
use dashu_int::ops::BitTest;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error type for decimal operations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DecimalError {
    #[error("invalid decimal format: {0}")]
    Parse(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("domain error: {0}")]
    Domain(String),
}

/// Default working precision in significant decimal digits.
///
/// Matches the usual decimal-context default; field configuration may raise
/// it per column.
pub const DEFAULT_PRECISION: usize = 28;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig. All fallible operations return Results -
/// nothing here panics on bad input.
#[derive(Debug, Clone)]
pub struct Decimal {
    inner: DBig,
}

impl Decimal {
    // ========== Construction ==========

    /// Raise a DBig to at least the default working precision
    ///
    /// Never lowers: an input carrying more digits than the default keeps
    /// all of them, and field configuration may raise the precision
    /// further downstream.
    fn with_work_precision(val: DBig) -> DBig {
        let precision = val.precision().max(DEFAULT_PRECISION);
        val.with_precision(precision).value()
    }

    /// Parse from string representation
    ///
    /// Supports plain decimals ("123", "3.14", "-0.5") and scientific
    /// notation ("1.5e10", "602214076e15").
    pub fn from_str(s: &str) -> Result<Self, DecimalError> {
        let s = s.trim();

        // Integer-mantissa scientific notation is built exactly from parts,
        // avoiding any intermediate rounding
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let lower = s.to_lowercase();
            let parts: Vec<&str> = lower.split('e').collect();
            if parts.len() == 2 {
                let mantissa: IBig = parts[0]
                    .parse()
                    .map_err(|_| DecimalError::Parse(s.to_string()))?;
                let exp: i32 = parts[1]
                    .parse()
                    .map_err(|_| DecimalError::Parse(s.to_string()))?;

                let result = DBig::from_parts(mantissa, exp as isize);
                return Ok(Self {
                    inner: Self::with_work_precision(result),
                });
            }
        }

        let inner: DBig = s.parse().map_err(|_| DecimalError::Parse(s.to_string()))?;

        Ok(Self {
            inner: Self::with_work_precision(inner),
        })
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self {
            inner: Self::with_work_precision(DBig::from(n)),
        }
    }

    /// Exact zero
    pub fn zero() -> Self {
        Self::from_i64(0)
    }

    /// Exact power of ten (10^exp), useful for decimal-place scaling
    pub fn pow10(exp: i32) -> Self {
        let result = DBig::from_parts(IBig::from(1), exp as isize);
        Self {
            inner: Self::with_work_precision(result),
        }
    }

    /// Create from f64 (may lose precision; NaN and infinities map to zero)
    pub fn from_f64(f: f64) -> Self {
        if f.is_nan() || f.is_infinite() {
            return Self { inner: DBig::ZERO };
        }
        let s = format!("{:.15}", f);
        Self::from_str(&s).unwrap_or(Self { inner: DBig::ZERO })
    }

    /// Raise the working precision (never lowers the current one)
    pub fn with_precision(&self, precision: usize) -> Self {
        let p = precision.max(self.inner.precision());
        Self {
            inner: self.inner.clone().with_precision(p).value(),
        }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    /// Number of significant decimal digits in the value
    pub fn digit_count(&self) -> usize {
        let (significand, _exponent) = self.inner.clone().into_repr().into_parts();
        let s = significand.to_string();
        s.trim_start_matches('-').len()
    }

    // ========== Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner + &other.inner,
        }
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner - &other.inner,
        }
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            inner: &self.inner * &other.inner,
        }
    }

    /// Negation
    pub fn neg(&self) -> Self {
        Self {
            inner: -self.inner.clone(),
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, DecimalError> {
        if other.is_zero() {
            Err(DecimalError::DivisionByZero)
        } else {
            Ok(Self {
                inner: &self.inner / &other.inner,
            })
        }
    }

    /// Integer power by binary exponentiation
    pub fn pow(&self, exp: i32) -> Self {
        if exp == 0 {
            return Self::from_i64(1);
        }

        let mut remaining = exp.unsigned_abs();
        let mut base = self.clone();
        let mut result = Self::from_i64(1);

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        if exp < 0 {
            Self::from_i64(1)
                .checked_div(&result)
                .unwrap_or(Self::from_i64(0))
        } else {
            result
        }
    }

    /// Square root at the given precision
    pub fn sqrt(&self, precision: usize) -> Result<Self, DecimalError> {
        if self.is_negative() {
            return Err(DecimalError::Domain(
                "square root of negative number".to_string(),
            ));
        }
        if self.is_zero() {
            return Ok(Self::from_i64(0));
        }

        let val = self.inner.clone().with_precision(precision).value();
        Ok(Self { inner: val.sqrt() })
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self {
            inner: Abs::abs(self.inner.clone()),
        }
    }

    /// Floor - largest integer <= x
    pub fn floor(&self) -> Self {
        Self {
            inner: self.inner.clone().floor(),
        }
    }

    /// Ceiling - smallest integer >= x
    pub fn ceil(&self) -> Self {
        Self {
            inner: self.inner.clone().ceil(),
        }
    }

    // ========== Extraction ==========

    /// Try to convert to i64 (integers within range only)
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }

        // DBig stores as significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_i64: i64 = significand.try_into().ok()?;

        if exponent == 0 {
            Some(sig_i64)
        } else if exponent > 0 && exponent <= 18 {
            sig_i64.checked_mul(10_i64.checked_pow(exponent as u32)?)
        } else if exponent < 0 && exponent >= -18 {
            let divisor = 10_i64.checked_pow((-exponent) as u32)?;
            if sig_i64 % divisor == 0 {
                Some(sig_i64 / divisor)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_f64: f64 = if significand.bit_len() <= 53 {
            match TryInto::<i64>::try_into(significand.clone()) {
                Ok(i) => i as f64,
                Err(_) => {
                    let is_neg = significand < IBig::ZERO;
                    let abs_sig = if is_neg {
                        -significand.clone()
                    } else {
                        significand.clone()
                    };
                    match TryInto::<u64>::try_into(abs_sig) {
                        Ok(u) => {
                            if is_neg {
                                -(u as f64)
                            } else {
                                u as f64
                            }
                        }
                        Err(_) => return None,
                    }
                }
            }
        } else {
            let extra_bits = significand.bit_len() - 53;
            let shifted = &significand >> extra_bits;
            let shifted_i64: i64 = shifted.try_into().ok()?;
            (shifted_i64 as f64) * 2_f64.powi(extra_bits as i32)
        };

        let result = if exponent == 0 {
            sig_f64
        } else if exponent > 0 && exponent <= 308 {
            sig_f64 * 10_f64.powi(exponent as i32)
        } else if exponent < 0 && exponent >= -308 {
            sig_f64 / 10_f64.powi((-exponent) as i32)
        } else {
            return None;
        };

        if result.is_finite() {
            Some(result)
        } else {
            None
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner
            .partial_cmp(&other.inner)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

// Decimals serialize as their exact decimal string so the storage encoding
// is bit-exact across round-trips.
impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i64() {
        let n = Decimal::from_i64(42);
        assert_eq!(n.to_i64(), Some(42));
    }

    #[test]
    fn test_from_str_integer() {
        let n = Decimal::from_str("123").unwrap();
        assert_eq!(n.to_i64(), Some(123));
    }

    #[test]
    fn test_from_str_decimal() {
        let n = Decimal::from_str("3.14").unwrap();
        assert!(!n.is_integer());
    }

    #[test]
    fn test_from_str_scientific() {
        let n = Decimal::from_str("1.5e2").unwrap();
        assert_eq!(n.to_i64(), Some(150));
    }

    #[test]
    fn test_from_str_garbage() {
        assert!(Decimal::from_str("not a number").is_err());
    }

    #[test]
    fn test_from_str_keeps_all_digits() {
        // Parsing must not impose the default precision as a ceiling
        let n = Decimal::from_str("1.2345678901234567890123456789012345").unwrap();
        assert_eq!(n.digit_count(), 35);
        assert_ne!(n, Decimal::from_str("1.234567890123456789012345679").unwrap());
    }

    #[test]
    fn test_add_sub_mul() {
        let a = Decimal::from_i64(10);
        let b = Decimal::from_i64(32);
        assert_eq!(a.add(&b).to_i64(), Some(42));
        assert_eq!(b.sub(&a).to_i64(), Some(22));
        assert_eq!(a.mul(&b).to_i64(), Some(320));
    }

    #[test]
    fn test_checked_div() {
        let a = Decimal::from_i64(84);
        let b = Decimal::from_i64(2);
        assert_eq!(a.checked_div(&b).unwrap().to_i64(), Some(42));
    }

    #[test]
    fn test_div_by_zero() {
        let a = Decimal::from_i64(42);
        assert!(a.checked_div(&Decimal::zero()).is_err());
    }

    #[test]
    fn test_pow() {
        let n = Decimal::from_i64(2);
        assert_eq!(n.pow(10).to_i64(), Some(1024));
        assert_eq!(Decimal::from_i64(3).pow(7).to_i64(), Some(2187));
        assert!(!n.pow(-2).is_integer());
    }

    #[test]
    fn test_pow_large_exponent() {
        // 2^64 has 20 digits, well within working precision
        let n = Decimal::from_i64(2).pow(64);
        assert_eq!(n, Decimal::from_str("18446744073709551616").unwrap());
    }

    #[test]
    fn test_pow10() {
        assert_eq!(Decimal::pow10(3).to_i64(), Some(1000));
        let tenth = Decimal::pow10(-1);
        assert_eq!(tenth, Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_sqrt() {
        let n = Decimal::from_i64(4);
        assert_eq!(n.sqrt(50).unwrap().to_i64(), Some(2));
        assert!(Decimal::from_i64(-4).sqrt(50).is_err());
    }

    #[test]
    fn test_ordering() {
        let a = Decimal::from_str("299.99").unwrap();
        let b = Decimal::from_i64(300);
        assert!(a < b);
        assert!(b > a);
        assert_eq!(b, Decimal::from_str("300").unwrap());
    }

    #[test]
    fn test_equality_across_representations() {
        // 1.5 and 1.50 are the same value
        let a = Decimal::from_str("1.5").unwrap();
        let b = Decimal::from_str("1.50").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(Decimal::from_str("1234.5").unwrap().digit_count(), 5);
        assert_eq!(Decimal::from_str("-0.25").unwrap().digit_count(), 2);
    }

    #[test]
    fn test_is_integer() {
        assert!(Decimal::from_i64(7).is_integer());
        assert!(!Decimal::from_str("7.5").unwrap().is_integer());
    }

    #[test]
    fn test_serde_round_trip_exact() {
        let n = Decimal::from_str("1133.98092500000000000001").unwrap();
        let json = serde_json::to_string(&n).unwrap();
        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(n, back);
    }

    #[test]
    fn test_neg_abs() {
        let n = Decimal::from_i64(-42);
        assert_eq!(n.abs().to_i64(), Some(42));
        assert_eq!(n.neg().to_i64(), Some(42));
    }
}
