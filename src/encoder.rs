//! Barcode encoding entry points.

use tracing::debug;

use crate::bars::Bars;
use crate::error::{ImbResult, InputFormatError};
use crate::payload::{self, BinaryPayload, Characters, Codewords};
use crate::types::{RoutingCode, TRACKING_LENGTH, TrackingNumber};

/// A fully encoded barcode, with the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barcode {
    /// The tracking number.
    pub tracking: TrackingNumber,
    /// The routing code, possibly empty.
    pub routing: RoutingCode,
    /// Merged binary payload.
    pub payload: BinaryPayload,
    /// 11-bit frame check sequence.
    pub fcs: u16,
    /// Codewords, least significant first.
    pub codewords: Codewords,
    /// Characters in bar-mapping order.
    pub characters: Characters,
    /// The 65 bars.
    pub bars: Bars,
}

impl Barcode {
    /// Encodes already validated fields.
    pub fn new(tracking: TrackingNumber, routing: RoutingCode) -> ImbResult<Self> {
        let payload = BinaryPayload::new(&tracking, &routing)?;
        let fcs = payload.frame_check_sequence();
        debug!(payload = %payload.to_hex(), fcs, "computed binary payload");

        let codewords = payload.codewords(fcs)?;
        let characters = payload::characters(&codewords, fcs)?;
        let bars = Bars::from_characters(&characters);

        Ok(Barcode {
            tracking,
            routing,
            payload,
            fcs,
            codewords,
            characters,
            bars,
        })
    }

    /// The binary payload as 26 uppercase hexadecimal digits.
    pub fn payload_hex(&self) -> String {
        self.payload.to_hex()
    }
}

/// Encoder settings.
///
/// The default encoder accepts any digit in the barcode identifier. A strict
/// encoder also enforces the USPS 0-4 range for its second digit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    strict_barcode_identifier: bool,
}

impl Encoder {
    /// Creates a permissive encoder.
    pub const fn new() -> Self {
        Encoder {
            strict_barcode_identifier: false,
        }
    }

    /// Creates an encoder that rejects barcode identifiers USPS never assigns.
    pub const fn strict() -> Self {
        Encoder {
            strict_barcode_identifier: true,
        }
    }

    /// Sets whether the barcode identifier is checked.
    pub const fn with_strict_barcode_identifier(mut self, strict: bool) -> Self {
        self.strict_barcode_identifier = strict;
        self
    }

    /// Whether the barcode identifier is checked.
    pub const fn is_strict(&self) -> bool {
        self.strict_barcode_identifier
    }

    /// Encodes a tracking number immediately followed by a routing code.
    pub fn encode(&self, input: &str) -> ImbResult<String> {
        Ok(self.encode_barcode(input)?.bars.to_string())
    }

    /// Encodes separately held tracking and routing fields.
    pub fn encode_parts(&self, tracking: &str, routing: &str) -> ImbResult<String> {
        let tracking = TrackingNumber::parse(tracking)?;
        let routing = RoutingCode::parse(routing)?;
        Ok(self.encode_fields(tracking, routing)?.bars.to_string())
    }

    /// Encodes `input` and returns the barcode with its intermediate values.
    pub fn encode_barcode(&self, input: &str) -> ImbResult<Barcode> {
        let (tracking, routing) = split_input(input)?;
        self.encode_fields(tracking, routing)
    }

    /// Encodes parsed fields.
    pub fn encode_fields(
        &self,
        tracking: TrackingNumber,
        routing: RoutingCode,
    ) -> ImbResult<Barcode> {
        if self.strict_barcode_identifier && !tracking.has_standard_barcode_identifier() {
            return Err(InputFormatError::InvalidBarcodeIdentifier {
                digit: tracking.digits()[1],
            }
            .into());
        }

        debug!(%tracking, %routing, "encoding barcode");
        Barcode::new(tracking, routing)
    }
}

/// Splits the combined input into its tracking and routing segments.
fn split_input(input: &str) -> Result<(TrackingNumber, RoutingCode), InputFormatError> {
    if input.len() < TRACKING_LENGTH {
        return Err(InputFormatError::TooShort {
            length: input.len(),
        });
    }

    // a non-ASCII character may straddle the segment boundary
    let tracking_chars = input
        .char_indices()
        .take_while(|(position, _)| *position < TRACKING_LENGTH);
    for (position, found) in tracking_chars {
        if !found.is_ascii_digit() {
            return Err(InputFormatError::TrackingNotNumeric { position, found });
        }
    }

    let (tracking, routing) = input.split_at(TRACKING_LENGTH);
    Ok((
        TrackingNumber::parse(tracking)?,
        RoutingCode::parse_at(routing, TRACKING_LENGTH)?,
    ))
}

/// Encodes a 20 digit tracking number followed by a 0, 5, 9 or 11 digit
/// routing code into 65 bar letters.
///
/// # Examples
///
/// ```rust
/// let bars = usps_imb::encode("01234567094987654321").unwrap();
/// assert_eq!(
///     bars,
///     "ATTFATTDTTADTAATTDTDTATTDAFDDFADFDFTFFFFFTATFAAAATDFFTDAADFTFDTDT"
/// );
/// ```
pub fn encode(input: &str) -> ImbResult<String> {
    Encoder::new().encode(input)
}

/// Encodes separately held tracking and routing fields.
///
/// ```rust
/// let bars = usps_imb::encode_parts("01234567094987654321", "01234").unwrap();
/// assert_eq!(bars, usps_imb::encode("0123456709498765432101234").unwrap());
/// ```
pub fn encode_parts(tracking: &str, routing: &str) -> ImbResult<String> {
    Encoder::new().encode_parts(tracking, routing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImbError;

    #[test]
    fn test_split_input() {
        let (tracking, routing) = split_input("0123456709498765432101234").unwrap();
        assert_eq!(tracking.to_string(), "01234567094987654321");
        assert_eq!(routing.as_str(), "01234");

        let (_, routing) = split_input("01234567094987654321").unwrap();
        assert!(routing.is_empty());
    }

    #[test]
    fn test_split_input_errors() {
        assert_eq!(split_input(""), Err(InputFormatError::TooShort { length: 0 }));
        assert_eq!(
            split_input("0123456709498765432"),
            Err(InputFormatError::TooShort { length: 19 })
        );
        assert_eq!(
            split_input("0123456709498765432A01234"),
            Err(InputFormatError::TrackingNotNumeric {
                position: 19,
                found: 'A'
            })
        );
        assert_eq!(
            split_input("012345670949876543210123"),
            Err(InputFormatError::InvalidRoutingLength { length: 4 })
        );
        assert_eq!(
            split_input("0123456709498765432101a34"),
            Err(InputFormatError::RoutingNotNumeric {
                position: 22,
                found: 'a'
            })
        );
    }

    #[test]
    fn test_split_input_multibyte_at_boundary() {
        // 'é' occupies bytes 19 and 20
        let input = "0123456709498765432é0123";
        assert_eq!(
            split_input(input),
            Err(InputFormatError::TrackingNotNumeric {
                position: 19,
                found: 'é'
            })
        );
    }

    #[test]
    fn test_strict_encoder() {
        let input = "09234567094987654321";
        assert!(Encoder::new().encode(input).is_ok());
        assert_eq!(
            Encoder::strict().encode(input),
            Err(ImbError::InputFormat(
                InputFormatError::InvalidBarcodeIdentifier { digit: 9 }
            ))
        );
        assert!(Encoder::strict().encode("01234567094987654321").is_ok());

        let encoder = Encoder::new().with_strict_barcode_identifier(true);
        assert!(encoder.is_strict());
        assert_eq!(encoder, Encoder::strict());
    }

    #[test]
    fn test_encode_parts_errors() {
        assert_eq!(
            encode_parts("0123", ""),
            Err(ImbError::InputFormat(
                InputFormatError::InvalidTrackingLength { length: 4 }
            ))
        );
        assert_eq!(
            encode_parts("01234567094987654321", "1234"),
            Err(ImbError::InputFormat(
                InputFormatError::InvalidRoutingLength { length: 4 }
            ))
        );
    }

    #[test]
    fn test_encode_barcode_intermediates() {
        let barcode = Encoder::new()
            .encode_barcode("01234567094987654321012345678")
            .unwrap();
        assert_eq!(barcode.routing.as_str(), "012345678");
        assert_eq!(barcode.payload_hex(), "000202BDC097711204D21804B1");
        assert_eq!(barcode.payload_hex(), barcode.payload.to_hex());
        assert_eq!(barcode.fcs, 0x606);
        assert_eq!(
            barcode.codewords,
            [1026, 1333, 468, 470, 413, 198, 1363, 1113, 110, 659]
        );
        assert_eq!(
            barcode.bars.to_string(),
            "ADFTTAFDTTTTFATTADTAAATFTFTATDAAAFDDADATATDTDTTDFDTDATADADTDFFTFA"
        );
    }
}
