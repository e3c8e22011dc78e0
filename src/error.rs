//! Error types for barcode encoding.

use std::error::Error;
use std::fmt;

/// Result type for encoding operations.
pub type ImbResult<T> = Result<T, ImbError>;

/// The caller handed in something that is not a well-formed IMB input.
///
/// Raised before any numeric processing takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormatError {
    /// Input is shorter than the 20 digit tracking number.
    TooShort {
        /// Length of the input, in bytes.
        length: usize,
    },

    /// A standalone tracking number did not have exactly 20 digits.
    InvalidTrackingLength {
        /// Length of the tracking number, in bytes.
        length: usize,
    },

    /// The tracking segment contains a character other than `0`-`9`.
    TrackingNotNumeric {
        /// Byte offset of the offending character in the input.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The routing segment is not 0, 5, 9 or 11 digits long.
    InvalidRoutingLength {
        /// Length of the routing segment, in bytes.
        length: usize,
    },

    /// The routing segment contains a character other than `0`-`9`.
    RoutingNotNumeric {
        /// Byte offset of the offending character in the input.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// Second barcode identifier digit outside 0-4 (strict encoders only).
    InvalidBarcodeIdentifier {
        /// The offending second digit.
        digit: u8,
    },

    /// A bar string did not contain exactly 65 symbols.
    InvalidBarCount {
        /// Number of symbols found.
        length: usize,
    },

    /// A bar string contains something other than `A`, `D`, `F` or `T`.
    InvalidBarSymbol {
        /// Index of the offending symbol.
        position: usize,
        /// The offending character.
        found: char,
    },
}

impl fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormatError::TooShort { length } => {
                write!(
                    f,
                    "Input too short: expected at least 20 digits, got {}",
                    length
                )
            }
            InputFormatError::InvalidTrackingLength { length } => {
                write!(
                    f,
                    "Invalid tracking number length: expected 20 digits, got {}",
                    length
                )
            }
            InputFormatError::TrackingNotNumeric { position, found } => {
                write!(
                    f,
                    "Tracking number is not numeric: found {:?} at position {}",
                    found, position
                )
            }
            InputFormatError::InvalidRoutingLength { length } => {
                write!(
                    f,
                    "Invalid routing code length: expected 0, 5, 9 or 11 digits, got {}",
                    length
                )
            }
            InputFormatError::RoutingNotNumeric { position, found } => {
                write!(
                    f,
                    "Routing code is not numeric: found {:?} at position {}",
                    found, position
                )
            }
            InputFormatError::InvalidBarcodeIdentifier { digit } => {
                write!(
                    f,
                    "Invalid barcode identifier: second digit must be 0-4, got {}",
                    digit
                )
            }
            InputFormatError::InvalidBarCount { length } => {
                write!(f, "Invalid bar count: expected 65 symbols, got {}", length)
            }
            InputFormatError::InvalidBarSymbol { position, found } => {
                write!(
                    f,
                    "Invalid bar symbol {:?} at position {}: expected one of A, D, F, T",
                    found, position
                )
            }
        }
    }
}

impl Error for InputFormatError {}

/// A numeric string could not be parsed by the big-integer helper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Radix the input was parsed in.
    pub radix: u32,
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed base-{} number: {:?}", self.radix, self.input)
    }
}

impl Error for ParseError {}

/// An intermediate value did not fit where the encoding pipeline needs it.
///
/// Never produced for well-formed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Division by zero in the big-integer helper.
    DivisionByZero,

    /// Value exceeds the range allowed at this stage.
    ValueOutOfRange {
        /// Name of the value.
        what: &'static str,
        /// String representation of the value.
        value: String,
    },

    /// An N-of-13 table could not be filled to the requested size.
    TableSizeMismatch {
        /// Population count of the table entries.
        set_bits: u32,
        /// Requested table size.
        size: usize,
    },
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => write!(f, "Division by zero"),
            ArithmeticError::ValueOutOfRange { what, value } => {
                write!(f, "Value out of range for {}: {}", what, value)
            }
            ArithmeticError::TableSizeMismatch { set_bits, size } => {
                write!(
                    f,
                    "Cannot build {}-of-13 table with {} entries",
                    set_bits, size
                )
            }
        }
    }
}

impl Error for ArithmeticError {}

/// Any error produced while encoding a barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImbError {
    /// Input failed validation.
    InputFormat(InputFormatError),
    /// A numeric string could not be parsed.
    Parse(ParseError),
    /// An intermediate value was out of range.
    Arithmetic(ArithmeticError),
}

impl fmt::Display for ImbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImbError::InputFormat(err) => write!(f, "Input format error: {}", err),
            ImbError::Parse(err) => write!(f, "Parse error: {}", err),
            ImbError::Arithmetic(err) => write!(f, "Arithmetic error: {}", err),
        }
    }
}

impl Error for ImbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ImbError::InputFormat(err) => Some(err),
            ImbError::Parse(err) => Some(err),
            ImbError::Arithmetic(err) => Some(err),
        }
    }
}

impl From<InputFormatError> for ImbError {
    fn from(err: InputFormatError) -> Self {
        ImbError::InputFormat(err)
    }
}

impl From<ParseError> for ImbError {
    fn from(err: ParseError) -> Self {
        ImbError::Parse(err)
    }
}

impl From<ArithmeticError> for ImbError {
    fn from(err: ArithmeticError) -> Self {
        ImbError::Arithmetic(err)
    }
}
