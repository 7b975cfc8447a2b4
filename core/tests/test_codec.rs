// Codec entry points and shared configuration:
//
// * `TsiCodec` with a command catalog and options
// * encode validates with the same limits decode applies
// * `CodecOptions` / `CommandTable` JSON loading
// * decode report merging
// * batch decode / encode on worker threads

#[cfg(test)]
mod tests {
    use tsi_core::batch::{decode_all, encode_all, merge_reports};
    use tsi_core::catalog::{command_id, command_name, CommandCatalog, CommandTable, PlaceholderCatalog};
    use tsi_core::prelude::*;
    use tsi_core::{decode_file, encode_file};

    const CATALOG_JSON: &str = r#"{
        "commands": [
            { "id": 100, "name": "Play/Pause" },
            { "id": 205, "name": "Tempo Adjust" },
            { "id": 3000, "name": "FX Dry/Wet" }
        ]
    }"#;

    fn model(name: &str, command: &str) -> MappingFile {
        let mut device = Device::new(name);
        device.push(MappingEntry::new(command, Direction::In).with_control(MidiControl::cc(1, 10)));
        device.push(MappingEntry::new(command, Direction::Out).with_control(MidiControl::cc(1, 10)));
        MappingFile { version: 1, devices: vec![device] }
    }

// # ✅ 1. Catalog

    #[test]
    fn catalog_loads_from_json() {
        let table = CommandTable::from_json(CATALOG_JSON).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.name_of(205), Some("Tempo Adjust"));
        assert_eq!(table.id_of("FX Dry/Wet"), Some(3000));
        assert_eq!(table.id_of("Nope"), None);
    }

    #[test]
    fn catalog_rejects_bad_json() {
        assert!(matches!(CommandTable::from_json("{\"commands\": 5}"), Err(TsiError::Config(_))));
    }

    #[test]
    fn placeholders_cover_unknown_ids() {
        let table = CommandTable::from_json(CATALOG_JSON).unwrap();
        assert_eq!(command_name(&table, 100), "Play/Pause");
        assert_eq!(command_name(&table, 77), "Command #77");
        assert_eq!(command_id(&table, "Command #77"), Some(77));
        assert_eq!(command_id(&PlaceholderCatalog, "Play/Pause"), None);
        assert_eq!(command_id(&PlaceholderCatalog, "Command #x"), None);
    }

    #[test]
    fn later_insert_replaces_both_directions() {
        let mut table = CommandTable::new();
        table.insert(1, "A");
        table.insert(1, "B");
        table.insert(2, "B");
        assert_eq!(table.len(), 1);
        assert_eq!(table.name_of(1), None);
        assert_eq!(table.id_of("A"), None);
        assert_eq!(table.id_of("B"), Some(2));
    }

// # ✅ 2. Options

    #[test]
    fn options_load_with_defaults() {
        let opts = CodecOptions::from_json(r#"{ "strict": true }"#).unwrap();
        assert_eq!(opts, CodecOptions::strict());
        assert_eq!(opts.max_wstring_chars, 10_000);
        assert_eq!(opts.max_binding_chunk_len, 500);
        assert_eq!(opts.max_comment_chars, 1_000);
    }

    #[test]
    fn options_reject_unknown_keys() {
        assert!(matches!(CodecOptions::from_json(r#"{ "stritc": true }"#), Err(TsiError::Config(_))));
    }

// # ✅ 3. Codec with a catalog

    #[test]
    fn named_commands_roundtrip_through_a_document() {
        let table = CommandTable::from_json(CATALOG_JSON).unwrap();
        let codec = TsiCodec::default().with_catalog(&table);
        let original = model("Controller", "Play/Pause");

        let doc = codec.encode_file(&original).unwrap();
        assert!(doc.starts_with(b"<?xml version=\"1.0\""));
        assert_eq!(codec.decode_file(&doc).unwrap(), original);

        // Without the catalog the same document decodes to placeholders.
        let anonymous = decode_file(&doc).unwrap();
        assert_eq!(anonymous.devices[0].mappings[0].command, "Command #100");
        assert_eq!(encode_file(&anonymous).unwrap(), doc);
    }

    #[test]
    fn unknown_command_name_is_refused() {
        let codec = TsiCodec::default();
        let err = codec.encode_file(&model("Controller", "Play/Pause")).unwrap_err();
        assert!(matches!(err, TsiError::InvalidModel { source: ModelError::UnknownCommand(_), .. }));
    }

    #[test]
    fn codec_keeps_its_options() {
        let codec = TsiCodec::new(CodecOptions::strict(), &PlaceholderCatalog);
        assert!(codec.options().strict);
        assert!(!codec.with_options(CodecOptions::default()).options().strict);
    }

    #[test]
    fn encode_applies_the_codec_comment_limit() {
        let opts = CodecOptions { max_comment_chars: 10, ..Default::default() };
        let codec = TsiCodec::new(opts, &PlaceholderCatalog);

        let mut long = model("Controller", "Command #1");
        long.devices[0].mappings[0].comment = "Twelve chars".to_string();
        let err = codec.encode_payload(&long).unwrap_err();
        assert!(matches!(
            err,
            TsiError::InvalidModel {
                mapping: Some(0),
                source: ModelError::TextTooLong { chars: 12, max: 10, .. },
                ..
            }
        ));
        // The default limit still accepts it.
        assert!(TsiCodec::default().encode_payload(&long).is_ok());

        let mut short = model("Controller", "Command #1");
        short.devices[0].mappings[0].comment = "Nine char".to_string();
        let payload = codec.encode_payload(&short).unwrap();
        assert_eq!(codec.decode_payload(&payload).unwrap(), short);
    }

// # ✅ 4. Reports

    #[test]
    fn reports_merge() {
        let mut a = DecodeReport { devices: 1, mappings: 4, unknown_frames: vec![*b"XYZW"], ..Default::default() };
        let b = DecodeReport {
            devices: 2,
            skipped_malformed: 3,
            unknown_frames: vec![*b"XYZW", [0, 1, 2, 3]],
            ..Default::default()
        };
        a += b;
        assert_eq!((a.devices, a.mappings, a.skipped_malformed), (3, 4, 3));
        assert_eq!(a.unknown_frame_names(), vec!["XYZW".to_string(), "0x00010203".to_string()]);
        assert!(!a.is_clean());
    }

// # ✅ 5. Batch

    #[test]
    fn batch_preserves_order_and_isolates_failures() {
        let codec = TsiCodec::default();
        let models: Vec<MappingFile> = (0..9).map(|i| model(&format!("dev {i}"), &format!("Command #{}", i + 1))).collect();

        let docs: Vec<Vec<u8>> = encode_all(&codec, &models).into_iter().map(Result::unwrap).collect();
        assert_eq!(docs.len(), models.len());

        let mut inputs = docs.clone();
        inputs.insert(4, b"garbage".to_vec());
        let results = decode_all(&codec, &inputs);
        assert_eq!(results.len(), 10);
        assert!(results[4].is_err());

        let decoded: Vec<&MappingFile> = results.iter().filter_map(|r| r.as_ref().ok()).map(|(m, _)| m).collect();
        assert_eq!(decoded, models.iter().collect::<Vec<_>>());

        let total = merge_reports(&results);
        assert_eq!((total.devices, total.mappings), (9, 18));
    }

    #[test]
    fn batch_of_nothing_is_empty() {
        let codec = TsiCodec::default();
        assert!(decode_all::<Vec<u8>>(&codec, &[]).is_empty());
        assert!(encode_all(&codec, &[]).is_empty());
    }

    #[test]
    fn encode_failures_stay_per_item() {
        let codec = TsiCodec::default();
        let models = vec![model("ok", "Command #1"), model("bad", "Unknown"), model("ok", "Command #2")];
        let results = encode_all(&codec, &models);
        assert!(results[0].is_ok() && results[2].is_ok());
        assert!(results[1].is_err());
    }
}
