//! Payload encoding: from tracking and routing fields to the ten characters.
//!
//! The routing code and tracking number are merged into a single integer of
//! at most 102 bits. That integer is carried as a 13-byte [`BinaryPayload`],
//! checksummed, and split by mixed-radix division into ten codewords which
//! are looked up in the N-of-13 tables.

use data_encoding::HEXUPPER;
use tracing::trace;

use crate::bignum::BigNumber;
use crate::error::ArithmeticError;
use crate::fcs::{self, FIRST_BYTE_MASK, PAYLOAD_BYTES};
use crate::tables::{CHARACTER_MASK, CODEWORD_SPACE, character_for_codeword};
use crate::types::{RoutingCode, TrackingNumber};

/// Number of significant payload bits.
pub const PAYLOAD_BITS: u64 = 102;

/// Number of codewords and characters.
pub const CODEWORD_COUNT: usize = 10;

/// Radix of the least significant codeword.
pub const FIRST_CODEWORD_RADIX: u32 = 636;

/// Radix of codewords 1-8.
pub const CODEWORD_RADIX: u32 = 1365;

/// Added to the last codeword when FCS bit 10 is set.
pub const FCS_CODEWORD_OFFSET: u16 = 659;

/// 10^18, the weight of the 18 trailing tracking digits.
const TRACKING_TAIL_SCALE: u64 = 1_000_000_000_000_000_000;

/// FCS bit that selects complementing of the first character.
const FIRST_CHARACTER_FCS_BIT: u16 = 0x200;

/// Ten codeword values, least significant first.
pub type Codewords = [u16; CODEWORD_COUNT];

/// Ten 13-bit characters in bar-mapping order.
pub type Characters = [u16; CODEWORD_COUNT];

/// Merges the routing code and tracking number into one integer.
///
/// Equivalent to appending tracking digits 2-19 to the decimal rendering
/// of `(offset * 10 + digit0) * 5 + digit1`.
pub fn merge(tracking: &TrackingNumber, routing: &RoutingCode) -> BigNumber {
    let digits = tracking.digits();
    BigNumber::from(routing.offset())
        .mul_add(10, u64::from(digits[0]))
        .mul_add(5, u64::from(digits[1]))
        .mul_add(TRACKING_TAIL_SCALE, tracking.tail())
}

/// The merged value as 13 big-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryPayload([u8; PAYLOAD_BYTES]);

impl BinaryPayload {
    /// Merges the input fields into a payload.
    pub fn new(tracking: &TrackingNumber, routing: &RoutingCode) -> Result<Self, ArithmeticError> {
        Self::from_number(&merge(tracking, routing))
    }

    /// Renders `value` as a payload, failing if it needs more than 13 bytes.
    pub fn from_number(value: &BigNumber) -> Result<Self, ArithmeticError> {
        Ok(BinaryPayload(value.to_be_bytes_padded()?))
    }

    /// The raw payload bytes.
    pub fn as_bytes(&self) -> &[u8; PAYLOAD_BYTES] {
        &self.0
    }

    /// The payload as 26 uppercase hexadecimal digits.
    pub fn to_hex(&self) -> String {
        HEXUPPER.encode(&self.0)
    }

    /// Frame check sequence over the payload.
    pub fn frame_check_sequence(&self) -> u16 {
        fcs::frame_check_sequence(&self.0)
    }

    /// The 102-bit value, with the two excess bits of the first byte cleared.
    pub fn truncated(&self) -> BigNumber {
        let mut bytes = self.0;
        bytes[0] &= FIRST_BYTE_MASK;
        BigNumber::from_be_bytes(&bytes)
    }

    /// Splits the payload into codewords, folding in FCS bit 10.
    pub fn codewords(&self, fcs: u16) -> Result<Codewords, ArithmeticError> {
        codewords(self.truncated(), fcs)
    }
}

/// Splits a 102-bit value into ten codewords.
///
/// Codeword 0 is twice the value modulo 636, codewords 1-8 are successive
/// remainders modulo 1365, and codeword 9 is what is left, plus 659 when
/// the FCS high bit is set.
pub fn codewords(value: BigNumber, fcs: u16) -> Result<Codewords, ArithmeticError> {
    if value.bits() > PAYLOAD_BITS {
        return Err(ArithmeticError::ValueOutOfRange {
            what: "binary payload",
            value: value.to_hex(),
        });
    }

    let mut data = value;
    let mut codewords = [0u16; CODEWORD_COUNT];

    codewords[0] = (data.div_rem_u32(FIRST_CODEWORD_RADIX)? * 2) as u16;
    for codeword in &mut codewords[1..CODEWORD_COUNT - 1] {
        *codeword = data.div_rem_u32(CODEWORD_RADIX)? as u16;
    }

    let mut last = data.to_u32()?;
    if fcs::high_bit(fcs) {
        last += u32::from(FCS_CODEWORD_OFFSET);
    }
    if last as usize >= CODEWORD_SPACE {
        return Err(ArithmeticError::ValueOutOfRange {
            what: "last codeword",
            value: last.to_string(),
        });
    }
    codewords[CODEWORD_COUNT - 1] = last as u16;

    trace!(?codewords, "split payload into codewords");
    Ok(codewords)
}

/// Maps codewords to characters.
///
/// Character `i` is complemented within 13 bits when FCS bit `9 - i` is set,
/// and the resulting sequence is reversed.
pub fn characters(codewords: &Codewords, fcs: u16) -> Result<Characters, ArithmeticError> {
    let mut characters = [0u16; CODEWORD_COUNT];

    for (index, (character, &codeword)) in characters.iter_mut().zip(codewords).enumerate() {
        let mut value = character_for_codeword(codeword)?;
        if fcs & (FIRST_CHARACTER_FCS_BIT >> index) != 0 {
            value ^= CHARACTER_MASK;
        }
        *character = value;
    }

    characters.reverse();
    trace!(?characters, "mapped codewords to characters");
    Ok(characters)
}
