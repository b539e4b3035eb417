//! Arbitrary-precision signed decimal facade.
//!
//! The stable-pool invariant math (see `cosmoarb-amm`) needs more fractional
//! precision than a fixed-width mantissa type like `rust_decimal::Decimal` can
//! offer (its 96-bit mantissa tops out around 28-29 significant digits). This
//! facade wraps `bigdecimal::BigDecimal`, which is backed by an arbitrary-width
//! `BigInt`, and exposes only the operations the rest of the workspace needs:
//! the four basic operations, comparison, absolute value, negation,
//! integer-power, square root, and string conversions.
//!
//! Precision is never process-global. Every operation that can produce a
//! non-terminating result (division, square root) takes an explicit
//! [`Precision`] value. Callers that don't need a custom precision use
//! [`DEFAULT_PRECISION`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum fractional-digit precision mandated for stable-pool math.
pub const DEFAULT_PRECISION: u32 = 30;

/// Newton iterations allowed for the internal `sqrt` solver before giving up.
const SQRT_MAX_ITERATIONS: u32 = 100;

/// Explicit precision (number of fractional digits) for a division or sqrt.
///
/// Threaded through call sites instead of a mutable global so construction of
/// a precision context can never race across concurrent evaluations (there
/// are none today, but the contract holds regardless).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(u32);

impl Precision {
    pub fn new(fractional_digits: u32) -> Self {
        Self(fractional_digits)
    }

    pub fn fractional_digits(&self) -> u32 {
        self.0
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(DEFAULT_PRECISION)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecimalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("square root of negative number: {0}")]
    NegativeSqrt(String),
    #[error("invalid decimal string: '{0}'")]
    ParseError(String),
}

/// An arbitrary-precision signed decimal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn zero() -> Self {
        Decimal(BigDecimal::from(0))
    }

    pub fn one() -> Self {
        Decimal(BigDecimal::from(1))
    }

    pub fn from_i64(value: i64) -> Self {
        Decimal(BigDecimal::from(value))
    }

    pub fn from_u64(value: u64) -> Self {
        Decimal(BigDecimal::from(value))
    }

    /// Raw on-chain amounts are `u128`; `BigDecimal` has no native `From<u128>`
    /// impl, so this goes through `BigInt` directly.
    pub fn from_u128(value: u128) -> Self {
        Decimal(BigDecimal::new(BigInt::from(value), 0))
    }

    pub fn from_i128(value: i128) -> Self {
        Decimal(BigDecimal::new(BigInt::from(value), 0))
    }

    /// Truncates toward zero and returns the integral part as `u128`, if it
    /// fits and is non-negative. Used when a simulated swap's human-readable
    /// output must be reported back as a raw on-chain amount.
    pub fn to_u128_truncated(&self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        let truncated = self.0.with_scale(0);
        let (digits, _) = truncated.as_bigint_and_exponent();
        digits.to_string().parse::<u128>().ok()
    }

    /// Parses a plain decimal string ("123.456", "-0.5").
    pub fn from_str_exact(s: &str) -> Result<Self, DecimalError> {
        BigDecimal::from_str(s.trim())
            .map(Decimal)
            .map_err(|_| DecimalError::ParseError(s.to_string()))
    }

    /// Converts a raw integer-string amount (as stored on-chain) scaled by
    /// `10^decimals` into a human-readable `Decimal`.
    pub fn from_raw_str(raw: &str, decimals: u8) -> Result<Self, DecimalError> {
        let raw_int = BigInt::from_str(raw.trim())
            .map_err(|_| DecimalError::ParseError(raw.to_string()))?;
        Ok(Decimal(BigDecimal::new(raw_int, decimals as i64)))
    }

    /// Converts a human-readable `Decimal` back into a raw integer string
    /// scaled by `10^decimals`, truncating any remaining fractional part.
    pub fn to_raw_string(&self, decimals: u8) -> String {
        // Shift by `decimals` fractional digits, truncating toward zero.
        let shifted = self.0.with_scale(decimals as i64);
        let (digits, _scale) = shifted.as_bigint_and_exponent();
        digits.to_string()
    }

    /// Converts a raw `u128` amount (as stored on-chain) scaled by
    /// `10^decimals` into a human-readable `Decimal`.
    pub fn from_raw_u128(raw: u128, decimals: u8) -> Self {
        Decimal(BigDecimal::new(BigInt::from(raw), decimals as i64))
    }

    /// The `u128` counterpart to [`Decimal::to_raw_string`]: scales by
    /// `10^decimals`, truncates toward zero, and returns `None` if the
    /// result is negative or does not fit.
    pub fn to_raw_u128(&self, decimals: u8) -> Option<u128> {
        let shifted = self.0.with_scale(decimals as i64);
        let (digits, _scale) = shifted.as_bigint_and_exponent();
        if digits.sign() == Sign::Minus {
            return None;
        }
        digits.to_string().parse::<u128>().ok()
    }

    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    pub fn neg(&self) -> Self {
        Decimal(-self.0.clone())
    }

    pub fn add(&self, other: &Decimal) -> Self {
        Decimal(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Decimal) -> Self {
        Decimal(&self.0 - &other.0)
    }

    pub fn mul(&self, other: &Decimal) -> Self {
        Decimal(&self.0 * &other.0)
    }

    /// Divides `self / other`, rounding the result to `precision` fractional
    /// digits. Division by zero is a distinct, catchable error rather than a
    /// panic or an infinity sentinel.
    pub fn div(&self, other: &Decimal, precision: Precision) -> Result<Self, DecimalError> {
        if other.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        let quotient = &self.0 / &other.0;
        Ok(Decimal(quotient.with_scale(precision.fractional_digits() as i64)))
    }

    /// Raises `self` to an integer power. Negative exponents invert the base
    /// first (using `precision` for that inversion); `pow(0)` is always one,
    /// even for a zero base, matching the conventional `0^0 = 1`.
    pub fn pow(&self, exponent: i64, precision: Precision) -> Result<Self, DecimalError> {
        if exponent == 0 {
            return Ok(Decimal::one());
        }
        let magnitude = exponent.unsigned_abs();
        let mut result = BigDecimal::from(1);
        let mut base = self.0.clone();
        let mut remaining = magnitude;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            remaining >>= 1;
        }
        let result = Decimal(result);
        if exponent < 0 {
            Decimal::one().div(&result, precision)
        } else {
            Ok(result)
        }
    }

    /// Square root via Newton-Raphson, accurate to `precision` fractional
    /// digits. Errors on negative inputs; zero returns zero without
    /// iterating (an undefined `sqrt(0)` tangent upstream must be guarded
    /// separately by callers, see `cosmoarb-amm`'s geometric-mean bound).
    pub fn sqrt(&self, precision: Precision) -> Result<Self, DecimalError> {
        if self.is_negative() {
            return Err(DecimalError::NegativeSqrt(self.to_decimal_string()));
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }

        let two = Decimal::from_i64(2);
        let epsilon = Decimal::epsilon(precision);

        let mut guess = self.initial_sqrt_guess();
        for _ in 0..SQRT_MAX_ITERATIONS {
            let quotient = self.div(&guess, precision)?;
            let sum = guess.add(&quotient);
            let next = sum.div(&two, precision)?;
            let delta = next.sub(&guess).abs();
            guess = next;
            if delta.cmp(&epsilon) != Ordering::Greater {
                break;
            }
        }
        Ok(guess)
    }

    /// `10^-fractional_digits`, used as the Newton convergence threshold.
    pub fn epsilon(precision: Precision) -> Self {
        let digits = precision.fractional_digits();
        if digits == 0 {
            return Decimal::one();
        }
        Decimal(BigDecimal::new(BigInt::from(1), digits as i64))
    }

    fn initial_sqrt_guess(&self) -> Self {
        // A BigDecimal-native seed: half the input's own digit count gives a
        // guess within a few orders of magnitude, which Newton's quadratic
        // convergence cleans up in a handful of iterations regardless.
        let approx = self.0.to_string().parse::<f64>().unwrap_or(1.0);
        let seed = if approx.is_finite() && approx > 0.0 {
            approx.sqrt()
        } else {
            1.0
        };
        Decimal::from_str_exact(&format!("{seed:.15}")).unwrap_or_else(|_| Decimal::one())
    }

    /// Truncates toward zero and returns the integral part as `i64`, if it
    /// fits. Used where the domain model stores an otherwise-integral value
    /// (e.g. a stable-pool curve exponent) in a `Decimal` field.
    pub fn to_i64_truncated(&self) -> Option<i64> {
        let truncated = self.0.with_scale(0);
        let (digits, _) = truncated.as_bigint_and_exponent();
        digits.to_string().parse::<i64>().ok()
    }

    pub fn cmp(&self, other: &Decimal) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s)
    }
}
