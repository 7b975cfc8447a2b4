// XML / Base64 envelope:
//
// * exact document shape on encode
// * tolerant unwrap (BOM, whitespace in Base64, attribute order)
// * descriptive failures for non-XML, missing entry, bad Base64

#[cfg(test)]
mod tests {
    use tsi_core::envelope::{unwrap_payload, wrap_payload, EnvelopeError};
    use tsi_core::{decode_file, TsiError};

    const DOC: &str = concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#,
        "\n",
        r#"<NIXML><TraktorSettings><Entry Name="DeviceIO.Config.Controller" Type="3" Value="AAEC/w=="/></TraktorSettings></NIXML>"#,
        "\n",
    );

// # ✅ 1. Wrap / unwrap

    #[test]
    fn wrap_produces_the_exact_document() {
        let wrapped = wrap_payload(&[0x00, 0x01, 0x02, 0xFF]);
        assert_eq!(String::from_utf8(wrapped).unwrap(), DOC);
    }

    #[test]
    fn unwrap_inverts_wrap() {
        let payload: Vec<u8> = (0..=255u8).collect();
        assert_eq!(unwrap_payload(&wrap_payload(&payload)).unwrap(), payload);
        assert_eq!(unwrap_payload(&wrap_payload(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn unwrap_tolerates_bom_whitespace_and_extra_entries() {
        let doc = "\u{FEFF}<NIXML><TraktorSettings>\
                   <Entry Name=\"Other\" Type=\"1\" Value=\"1\"/>\
                   <Entry Value=\"AAEC\n  /w==\" Type=\"3\" Name=\"DeviceIO.Config.Controller\"/>\
                   </TraktorSettings></NIXML>";
        assert_eq!(unwrap_payload(doc.as_bytes()).unwrap(), vec![0x00, 0x01, 0x02, 0xFF]);
    }

// # ❌ 2. Failures

    #[test]
    fn non_xml_is_rejected() {
        assert!(matches!(unwrap_payload(b"DIOM\x00\x00\x00\x00"), Err(EnvelopeError::Xml(_))));
        assert!(matches!(unwrap_payload(&[0xC3, 0x28]), Err(EnvelopeError::NotUtf8(_))));
    }

    #[test]
    fn missing_entry_is_rejected() {
        let doc = r#"<NIXML><TraktorSettings><Entry Name="Something.Else" Type="3" Value="AA=="/></TraktorSettings></NIXML>"#;
        assert!(matches!(
            unwrap_payload(doc.as_bytes()),
            Err(EnvelopeError::MissingEntry("DeviceIO.Config.Controller"))
        ));
    }

    #[test]
    fn missing_value_and_wrong_type_are_rejected() {
        let no_value = r#"<NIXML><Entry Name="DeviceIO.Config.Controller" Type="3"/></NIXML>"#;
        assert!(matches!(unwrap_payload(no_value.as_bytes()), Err(EnvelopeError::MissingValue)));

        let wrong_type = r#"<NIXML><Entry Name="DeviceIO.Config.Controller" Type="1" Value="AA=="/></NIXML>"#;
        assert!(matches!(unwrap_payload(wrong_type.as_bytes()), Err(EnvelopeError::UnexpectedType(t)) if t == "1"));
    }

    #[test]
    fn bad_base64_is_rejected() {
        let doc = r#"<NIXML><Entry Name="DeviceIO.Config.Controller" Type="3" Value="@@not base64@@"/></NIXML>"#;
        assert!(matches!(unwrap_payload(doc.as_bytes()), Err(EnvelopeError::Base64(_))));
    }

    #[test]
    fn envelope_errors_surface_through_decode_file() {
        assert!(matches!(decode_file(b"not xml"), Err(TsiError::Envelope(EnvelopeError::Xml(_)))));
        // Valid envelope, payload with no DIOM root.
        assert!(matches!(decode_file(DOC.as_bytes()), Err(TsiError::Region { region: "DIOM root", .. })));
    }
}
