//! Encoder for the USPS Intelligent Mail Barcode (IMB, USPS-B-3200).
//!
//! An IMB carries a 20 digit tracking number and an optional routing code
//! (0, 5, 9 or 11 digits) in 65 bars, each one of ascender (`A`),
//! descender (`D`), full (`F`) or tracker (`T`). This crate produces that
//! bar string; drawing it, usually with a dedicated font, is left to the
//! caller.
//!
//! ```rust
//! use usps_imb::{Encoder, encode};
//!
//! let bars = encode("0123456709498765432101234567891").unwrap();
//! assert_eq!(
//!     bars,
//!     "AADTFFDFTDADTAADAATFDTDDAAADDTDTTDAFADADDDTFFFDDTTTADFAAADFTDAADA"
//! );
//!
//! let barcode = Encoder::new()
//!     .encode_barcode("0123456709498765432101234567891")
//!     .unwrap();
//! assert_eq!(barcode.fcs, 0x751);
//! assert_eq!(barcode.bars.to_string(), bars);
//! ```
//!
//! # Features
//!
//! * `crc-table` (default): compute the frame check sequence with the table
//!   driven `crc` crate instead of bit by bit. Results are identical.
//! * `serde` (default): `Serialize` for [`Barcode`] and the field types.

pub mod bars;
pub mod bignum;
pub mod error;
pub mod fcs;
pub mod payload;
pub mod tables;
pub mod types;

mod encoder;
#[cfg(feature = "serde")]
mod serde;


pub use bars::{BAR_COUNT, BarSymbol, Bars};
pub use encoder::{Barcode, Encoder, encode, encode_parts};
pub use error::{ArithmeticError, ImbError, ImbResult, InputFormatError, ParseError};
pub use payload::BinaryPayload;
pub use types::{RoutingCode, TrackingNumber};
