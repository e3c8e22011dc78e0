//! Arbitrary-precision arithmetic for the merged barcode payload.
//!
//! The merged routing and tracking value needs 102 bits, which is past what
//! the native integer types carry through the intermediate multiplications
//! comfortably, so the payload is held in a [`BigNumber`] backed by
//! `num_bigint::BigUint`.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{ArithmeticError, ParseError};

/// A non-negative integer of unbounded magnitude.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BigNumber(BigUint);

impl BigNumber {
    /// Returns zero.
    pub fn zero() -> Self {
        BigNumber(BigUint::zero())
    }

    /// Parses a number in the given radix (2-36).
    ///
    /// Every character must be a digit of `radix`; signs, separators and
    /// whitespace are rejected before any arithmetic happens.
    ///
    /// # Examples
    /// ```rust
    /// use usps_imb::bignum::BigNumber;
    ///
    /// let value = BigNumber::from_str_radix("ff", 16).unwrap();
    /// assert_eq!(value.to_string(), "255");
    /// assert!(BigNumber::from_str_radix("12x", 10).is_err());
    /// ```
    pub fn from_str_radix(input: &str, radix: u32) -> Result<Self, ParseError> {
        let malformed = || ParseError {
            radix,
            input: input.to_string(),
        };

        if !(2..=36).contains(&radix)
            || input.is_empty()
            || !input.chars().all(|c| c.is_digit(radix))
        {
            return Err(malformed());
        }

        BigUint::parse_bytes(input.as_bytes(), radix)
            .map(BigNumber)
            .ok_or_else(malformed)
    }

    /// Builds a number from big-endian bytes.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        BigNumber(BigUint::from_bytes_be(bytes))
    }

    /// Returns `self * factor + addend`.
    pub fn mul_add(&self, factor: u64, addend: u64) -> Self {
        BigNumber(&self.0 * BigUint::from(factor) + BigUint::from(addend))
    }

    /// Divides in place by `divisor` and returns the remainder.
    ///
    /// Euclidean semantics: for non-negative operands the quotient is
    /// truncated and `0 <= remainder < divisor`.
    pub fn div_rem_u32(&mut self, divisor: u32) -> Result<u32, ArithmeticError> {
        if divisor == 0 {
            return Err(ArithmeticError::DivisionByZero);
        }

        let divisor = BigUint::from(divisor);
        let remainder = &self.0 % &divisor;
        self.0 = &self.0 / &divisor;

        remainder
            .to_u32()
            .ok_or_else(|| ArithmeticError::ValueOutOfRange {
                what: "remainder",
                value: remainder.to_string(),
            })
    }

    /// Converts to `u32`, failing if the value does not fit.
    pub fn to_u32(&self) -> Result<u32, ArithmeticError> {
        self.0
            .to_u32()
            .ok_or_else(|| ArithmeticError::ValueOutOfRange {
                what: "u32 conversion",
                value: self.0.to_string(),
            })
    }

    /// Number of significant bits; zero for zero.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Renders the value in lowercase hexadecimal without padding.
    pub fn to_hex(&self) -> String {
        self.0.to_str_radix(16)
    }

    /// Renders the value as exactly `N` big-endian bytes, left-padded with zeros.
    pub fn to_be_bytes_padded<const N: usize>(&self) -> Result<[u8; N], ArithmeticError> {
        let bytes = self.0.to_bytes_be();
        if self.0.is_zero() {
            return Ok([0u8; N]);
        }
        if bytes.len() > N {
            return Err(ArithmeticError::ValueOutOfRange {
                what: "fixed-width byte rendering",
                value: self.to_hex(),
            });
        }

        let mut out = [0u8; N];
        out[N - bytes.len()..].copy_from_slice(&bytes);
        Ok(out)
    }
}

impl From<u64> for BigNumber {
    fn from(value: u64) -> Self {
        BigNumber(BigUint::from(value))
    }
}

impl FromStr for BigNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigNumber::from_str_radix(s, 10)
    }
}

impl fmt::Display for BigNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
