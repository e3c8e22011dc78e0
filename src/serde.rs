//! Serde serialization of encoded barcodes.
//!
//! Bars and input fields serialize as their string forms. A [`Barcode`]
//! serializes as a flat structure with the payload rendered as hex, which is
//! what gets logged or handed to a renderer alongside the bar string.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::bars::{BarSymbol, Bars};
use crate::encoder::Barcode;
use crate::types::{RoutingCode, TrackingNumber};

impl Serialize for BarSymbol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_char(self.as_char())
    }
}

impl Serialize for Bars {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for TrackingNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for RoutingCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Decomposition of the tracking number into its USPS fields.
#[derive(Serialize)]
struct TrackingFields {
    barcode_identifier: String,
    service_type: String,
    mailer_id: String,
    serial_number: String,
}

impl TrackingFields {
    fn new(tracking: &TrackingNumber) -> Self {
        let digits = tracking.to_string();
        let mailer_end = 5 + tracking.mailer_id_length();
        TrackingFields {
            barcode_identifier: digits[0..2].to_string(),
            service_type: digits[2..5].to_string(),
            mailer_id: digits[5..mailer_end].to_string(),
            serial_number: digits[mailer_end..].to_string(),
        }
    }
}

impl Serialize for Barcode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Barcode", 8)?;
        state.serialize_field("tracking_number", &self.tracking)?;
        state.serialize_field("tracking_fields", &TrackingFields::new(&self.tracking))?;
        state.serialize_field("routing_code", &self.routing)?;
        state.serialize_field("binary_payload", &self.payload_hex())?;
        state.serialize_field("fcs", &self.fcs)?;
        state.serialize_field("codewords", &self.codewords)?;
        state.serialize_field("characters", &self.characters)?;
        state.serialize_field("bars", &self.bars)?;
        state.end()
    }
}

impl Barcode {
    /// Serializes the barcode to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the barcode to an indented JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::encoder::Encoder;

    #[test]
    fn test_barcode_json() {
        let barcode = Encoder::new()
            .encode_barcode("0123456709498765432101234")
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&barcode.to_json().unwrap()).unwrap();

        assert_eq!(value["tracking_number"], "01234567094987654321");
        assert_eq!(value["routing_code"], "01234");
        assert_eq!(value["binary_payload"], "0000000D138A87BAB5CF3804B1");
        assert_eq!(value["fcs"], 0x065);
        assert_eq!(value["codewords"][0], 666);
        assert_eq!(value["characters"].as_array().unwrap().len(), 10);
        assert_eq!(
            value["bars"],
            "DTTAFADDTTFTDTFTFDTDDADADAFADFATDDFTAAAFDTTADFAAATDFDTDFADDDTDFFT"
        );

        let fields = &value["tracking_fields"];
        assert_eq!(fields["barcode_identifier"], "01");
        assert_eq!(fields["service_type"], "234");
        assert_eq!(fields["mailer_id"], "567094");
        assert_eq!(fields["serial_number"], "987654321");
    }

    #[test]
    fn test_bar_symbol_json() {
        let json = serde_json::to_string(&crate::BarSymbol::Full).unwrap();
        assert_eq!(json, "\"F\"");
    }
}
