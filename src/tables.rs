//! N-of-13 character tables.
//!
//! Each codeword is printed as a 13-bit character with either five or two bits
//! set. The two lookup tables are built from the bit-reversal symmetry of the
//! candidates and are computed once per process, then shared read-only.

use std::sync::OnceLock;

use tracing::trace;

use crate::error::ArithmeticError;

/// Width of a character, in bits.
pub const CHARACTER_BITS: u32 = 13;

/// Mask covering the 13 character bits.
pub const CHARACTER_MASK: u16 = 0x1FFF;

/// Number of entries in the 5-of-13 table, C(13, 5).
pub const TABLE_5_OF_13_SIZE: usize = 1287;

/// Number of entries in the 2-of-13 table, C(13, 2).
pub const TABLE_2_OF_13_SIZE: usize = 78;

/// Number of codeword values covered by both tables together.
pub const CODEWORD_SPACE: usize = TABLE_5_OF_13_SIZE + TABLE_2_OF_13_SIZE;

static TABLE_2_OF_13: OnceLock<Result<Vec<u16>, ArithmeticError>> = OnceLock::new();
static TABLE_5_OF_13: OnceLock<Result<Vec<u16>, ArithmeticError>> = OnceLock::new();

/// Reverses the low 13 bits of `value`.
///
/// # Examples
/// ```rust
/// use usps_imb::tables::reverse13;
///
/// assert_eq!(reverse13(0b0000000000011), 0b1100000000000);
/// assert_eq!(reverse13(0b1000000000001), 0b1000000000001);
/// ```
pub fn reverse13(value: u16) -> u16 {
    value.reverse_bits() >> (16 - CHARACTER_BITS)
}

/// Builds the table of 13-bit values with exactly `set_bits` bits set.
///
/// Candidates are visited in increasing order. An asymmetric pair
/// `(v, reverse13(v))` is stored at the next two free slots from the front,
/// smaller member first; a value equal to its own reversal is stored at the
/// next free slot from the back.
///
/// # Errors
///
/// Returns [`ArithmeticError::TableSizeMismatch`] when `size` is not the
/// number of candidates with `set_bits` bits set.
pub fn build_table(set_bits: u32, size: usize) -> Result<Vec<u16>, ArithmeticError> {
    let mismatch = || ArithmeticError::TableSizeMismatch { set_bits, size };

    let mut table = vec![0u16; size];
    let mut lower = 0usize;
    let mut upper = size;

    for candidate in 0..=CHARACTER_MASK {
        if candidate.count_ones() != set_bits {
            continue;
        }

        let reversed = reverse13(candidate);
        if reversed < candidate {
            // pair already placed
            continue;
        }

        if reversed == candidate {
            if upper == lower {
                return Err(mismatch());
            }
            upper -= 1;
            table[upper] = candidate;
        } else {
            if upper - lower < 2 {
                return Err(mismatch());
            }
            table[lower] = candidate;
            table[lower + 1] = reversed;
            lower += 2;
        }
    }

    if lower != upper {
        return Err(mismatch());
    }

    trace!(set_bits, size, "built N-of-13 table");
    Ok(table)
}

/// The shared 2-of-13 table.
pub fn table_2_of_13() -> Result<&'static [u16], ArithmeticError> {
    TABLE_2_OF_13
        .get_or_init(|| build_table(2, TABLE_2_OF_13_SIZE))
        .as_deref()
        .map_err(Clone::clone)
}

/// The shared 5-of-13 table.
pub fn table_5_of_13() -> Result<&'static [u16], ArithmeticError> {
    TABLE_5_OF_13
        .get_or_init(|| build_table(5, TABLE_5_OF_13_SIZE))
        .as_deref()
        .map_err(Clone::clone)
}

/// Looks up the character for a codeword.
///
/// Codewords 0-1286 index the 5-of-13 table, 1287-1364 the 2-of-13 table.
pub fn character_for_codeword(codeword: u16) -> Result<u16, ArithmeticError> {
    let index = usize::from(codeword);
    if index < TABLE_5_OF_13_SIZE {
        Ok(table_5_of_13()?[index])
    } else if index < CODEWORD_SPACE {
        Ok(table_2_of_13()?[index - TABLE_5_OF_13_SIZE])
    } else {
        Err(ArithmeticError::ValueOutOfRange {
            what: "codeword",
            value: codeword.to_string(),
        })
    }
}
