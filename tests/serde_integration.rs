//! Integration tests for serde serialization

#[cfg(feature = "serde")]
#[cfg(test)]
mod tests {
    use usps_imb::*;

    #[test]
    fn test_complete_barcode_serialization() {
        let barcode = Encoder::new()
            .encode_barcode("0123456709498765432101234567891")
            .unwrap();

        let json = barcode.to_json_pretty().unwrap();

        // Print for debugging
        println!("JSON: {json}");

        assert!(json.contains("\"tracking_number\": \"01234567094987654321\""));
        assert!(json.contains("\"routing_code\": \"01234567891\""));
        assert!(json.contains("\"binary_payload\": \"016907B2A24ABC16A2E5C004B1\""));
        assert!(json.contains("\"fcs\": 1873"));
        assert!(json.contains(
            "\"bars\": \"AADTFFDFTDADTAADAATFDTDDAAADDTDTTDAFADADDDTFFFDDTTTADFAAADFTDAADA\""
        ));
    }

    #[test]
    fn test_barcode_json_structure() {
        let barcode = Encoder::new()
            .encode_barcode("00270912345678123456")
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&barcode.to_json().unwrap()).unwrap();

        assert_eq!(value["routing_code"], "");
        assert_eq!(value["codewords"].as_array().unwrap().len(), 10);
        assert_eq!(value["bars"].as_str().unwrap().len(), 65);

        // nine digit mailer identifier
        assert_eq!(value["tracking_fields"]["mailer_id"], "912345678");
        assert_eq!(value["tracking_fields"]["serial_number"], "123456");

        let fcs = value["fcs"].as_u64().unwrap();
        assert!(fcs <= 0x7FF);
    }

    #[test]
    fn test_field_types_serialize_as_strings() {
        let tracking: TrackingNumber = "01234567094987654321".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&tracking).unwrap(),
            "\"01234567094987654321\""
        );

        let routing: RoutingCode = "01234".parse().unwrap();
        assert_eq!(serde_json::to_string(&routing).unwrap(), "\"01234\"");

        let bars: Bars = encode("01234567094987654321").unwrap().parse().unwrap();
        let json = serde_json::to_value(bars).unwrap();
        assert_eq!(
            json,
            "ATTFATTDTTADTAATTDTDTATTDAFDDFADFDFTFFFFFTATFAAAATDFFTDAADFTFDTDT"
        );
    }
}
