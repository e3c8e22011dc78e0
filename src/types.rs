//! Input fields of an Intelligent Mail barcode.

use std::fmt;
use std::str::FromStr;

use crate::error::InputFormatError;

/// Number of digits in a tracking number.
pub const TRACKING_LENGTH: usize = 20;

/// Allowed routing code lengths.
pub const ROUTING_LENGTHS: [usize; 4] = [0, 5, 9, 11];

/// Returns the first character of `segment` that is not an ASCII digit,
/// with its byte offset shifted by `base`.
fn first_non_digit(segment: &str, base: usize) -> Option<(usize, char)> {
    segment
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(position, found)| (base + position, found))
}

fn fold_digits(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0u64, |acc, &digit| acc * 10 + u64::from(digit))
}

/// The 20 digit tracking code.
///
/// Laid out as a two digit barcode identifier, a three digit service type,
/// a six or nine digit mailer identifier and a nine or six digit serial
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackingNumber {
    digits: [u8; TRACKING_LENGTH],
}

impl TrackingNumber {
    /// Parses a tracking number of exactly 20 ASCII digits.
    ///
    /// # Examples
    /// ```rust
    /// use usps_imb::TrackingNumber;
    ///
    /// let tracking: TrackingNumber = "01234567094987654321".parse().unwrap();
    /// assert_eq!(tracking.barcode_identifier(), 1);
    /// assert_eq!(tracking.service_type(), 234);
    /// assert_eq!(tracking.mailer_id(), 567094);
    /// assert_eq!(tracking.serial_number(), 987654321);
    /// ```
    pub fn parse(input: &str) -> Result<Self, InputFormatError> {
        if let Some((position, found)) = first_non_digit(input, 0) {
            return Err(InputFormatError::TrackingNotNumeric { position, found });
        }
        if input.len() != TRACKING_LENGTH {
            return Err(InputFormatError::InvalidTrackingLength {
                length: input.len(),
            });
        }

        let mut digits = [0u8; TRACKING_LENGTH];
        for (digit, byte) in digits.iter_mut().zip(input.bytes()) {
            *digit = byte - b'0';
        }
        Ok(TrackingNumber { digits })
    }

    /// The individual digit values, most significant first.
    pub fn digits(&self) -> &[u8; TRACKING_LENGTH] {
        &self.digits
    }

    /// Barcode identifier, digits 0-1.
    pub fn barcode_identifier(&self) -> u8 {
        self.digits[0] * 10 + self.digits[1]
    }

    /// Whether the second identifier digit is within the 0-4 range USPS assigns.
    pub fn has_standard_barcode_identifier(&self) -> bool {
        self.digits[1] <= 4
    }

    /// Service type identifier, digits 2-4.
    pub fn service_type(&self) -> u16 {
        fold_digits(&self.digits[2..5]) as u16
    }

    /// Length of the mailer identifier: nine digits when it starts with `9`.
    pub fn mailer_id_length(&self) -> usize {
        if self.digits[5] == 9 { 9 } else { 6 }
    }

    /// Mailer identifier.
    pub fn mailer_id(&self) -> u32 {
        fold_digits(&self.digits[5..5 + self.mailer_id_length()]) as u32
    }

    /// Serial number, the digits following the mailer identifier.
    pub fn serial_number(&self) -> u32 {
        fold_digits(&self.digits[5 + self.mailer_id_length()..]) as u32
    }

    /// Digits 2-19 as an integer, below 10^18.
    pub(crate) fn tail(&self) -> u64 {
        fold_digits(&self.digits[2..])
    }
}

impl FromStr for TrackingNumber {
    type Err = InputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackingNumber::parse(s)
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

/// Delivery point ZIP code: none, ZIP, ZIP+4 or ZIP+4+delivery point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RoutingCode {
    digits: String,
}

impl RoutingCode {
    /// An absent routing code.
    pub fn empty() -> Self {
        RoutingCode::default()
    }

    /// Parses a routing code of 0, 5, 9 or 11 ASCII digits.
    pub fn parse(input: &str) -> Result<Self, InputFormatError> {
        Self::parse_at(input, 0)
    }

    /// Parses a routing code that starts at byte `base` of a larger input,
    /// so errors report positions in that input.
    pub(crate) fn parse_at(input: &str, base: usize) -> Result<Self, InputFormatError> {
        if !ROUTING_LENGTHS.contains(&input.len()) {
            return Err(InputFormatError::InvalidRoutingLength {
                length: input.len(),
            });
        }
        if let Some((position, found)) = first_non_digit(input, base) {
            return Err(InputFormatError::RoutingNotNumeric { position, found });
        }

        Ok(RoutingCode {
            digits: input.to_string(),
        })
    }

    /// The routing digits.
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether the routing code is absent.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The routing digits read as a decimal number; zero when absent.
    pub fn value(&self) -> u64 {
        self.digits
            .bytes()
            .fold(0u64, |acc, byte| acc * 10 + u64::from(byte - b'0'))
    }

    /// Routing value with the length-dependent offset applied.
    ///
    /// ```rust
    /// use usps_imb::RoutingCode;
    ///
    /// assert_eq!(RoutingCode::empty().offset(), 0);
    /// assert_eq!(RoutingCode::parse("01234").unwrap().offset(), 1235);
    /// assert_eq!(RoutingCode::parse("00000000000").unwrap().offset(), 1_000_100_001);
    /// ```
    ///
    /// Each offset is one past the largest value of all shorter lengths, so
    /// the four lengths map onto disjoint ranges.
    pub fn offset(&self) -> u64 {
        let base = match self.len() {
            0 => 0,
            5 => 1,
            9 => 100_001,
            11 => 1_000_100_001,
            length => unreachable!("routing code of {} digits passed validation", length),
        };
        self.value() + base
    }
}

impl FromStr for RoutingCode {
    type Err = InputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutingCode::parse(s)
    }
}

impl fmt::Display for RoutingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
