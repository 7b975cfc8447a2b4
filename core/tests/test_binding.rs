// Binding table reconstruction and allocation:
//
// * DCBI primary chunks, DCDT occurrence fallback
// * primary wins, fallback only fills gaps
// * chunk size ceiling, string overrun, misaligned regions
// * each pass can be pointed at its own container
// * encode-side id allocation (unique descriptors, first seen first)
// * the first encoder on a shared control sets its mode

#[cfg(test)]
mod tests {
    use tsi_core::binding::{build_binding_table, build_binding_table_from, BindingAllocator, ControlDefinition};
    use tsi_core::config::CodecOptions;
    use tsi_core::framing::{scan_frames, write_frame, FrameTag, FrameWriter};
    use tsi_core::model::{ControllerType, EncoderMode, ModelError};
    use tsi_core::wstring::write_wstring;

    fn dcbi(binding_id: u32, descriptor: &str) -> Vec<u8> {
        let mut payload = binding_id.to_be_bytes().to_vec();
        payload.extend(write_wstring(descriptor));
        write_frame(FrameTag::Dcbi, &payload).unwrap()
    }

    fn dcdt(descriptor: &str, controller: ControllerType, mode: EncoderMode) -> Vec<u8> {
        let mut w = FrameWriter::new();
        ControlDefinition::new(descriptor, controller, mode).write(&mut w);
        write_frame(FrameTag::Dcdt, w.as_bytes()).unwrap()
    }

    fn button(descriptor: &str) -> Vec<u8> {
        dcdt(descriptor, ControllerType::Button, EncoderMode::default())
    }

// # ✅ 1. Primary pass

    #[test]
    fn primary_chunks_fill_the_table() {
        let mut region = dcbi(0, "Ch01.CC.010");
        region.extend(dcbi(1, "Ch01.Note.C4"));

        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), Some("Ch01.CC.010"));
        assert_eq!(table.get(1), Some("Ch01.Note.C4"));
        assert_eq!((table.primary, table.fallback), (2, 0));
    }

    #[test]
    fn misaligned_chunks_are_still_found() {
        let mut region = vec![0x00, 0x7F, 0x13];
        region.extend(dcbi(3, "Ch02.CC.001"));
        region.push(0xFF);
        region.extend(dcbi(4, "Ch02.CC.002"));

        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.get(3), Some("Ch02.CC.001"));
        assert_eq!(table.get(4), Some("Ch02.CC.002"));
    }

    #[test]
    fn first_chunk_for_an_id_wins() {
        let mut region = dcbi(0, "Ch01.CC.001");
        region.extend(dcbi(0, "Ch01.CC.002"));
        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.get(0), Some("Ch01.CC.001"));
        assert_eq!(table.primary, 1);
    }

// # ✅ 2. Fallback pass

    #[test]
    fn definitions_fill_gaps_by_occurrence_index() {
        let mut region = dcbi(1, "Ch02.CC.001");
        region.extend(button("Ch09.CC.000"));
        region.extend(button("Ch09.CC.099"));
        region.extend(button("Ch09.CC.100"));

        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.get(0), Some("Ch09.CC.000"));
        assert_eq!(table.get(1), Some("Ch02.CC.001"), "primary must win");
        assert_eq!(table.get(2), Some("Ch09.CC.100"));
        assert_eq!((table.primary, table.fallback), (1, 2));
    }

    #[test]
    fn definitions_alone_build_the_table() {
        let mut region = button("Ch03.Note.C4");
        region.extend(button("Ch03.Note.D4"));
        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, "Ch03.Note.C4"), (1, "Ch03.Note.D4")]);
    }

    #[test]
    fn encoder_mode_is_collected_from_definitions() {
        let region = dcdt("Ch04.CC.020", ControllerType::Encoder, EncoderMode::Mode7Fh01h);
        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.encoder_mode("Ch04.CC.020"), Some(EncoderMode::Mode7Fh01h));
        assert_eq!(table.encoder_mode("Ch04.CC.021"), None);
    }

    #[test]
    fn short_definition_uses_defaults() {
        let payload = write_wstring("Ch01.CC.001");
        let def = ControlDefinition::parse(&payload, &CodecOptions::default()).unwrap();
        assert_eq!(def.descriptor, "Ch01.CC.001");
        assert_eq!((def.control_type, def.min, def.max), (0, 0.0, 1.0));
        assert_eq!(def.encoder_mode, EncoderMode::Mode3Fh41h);
    }

// # ❌ 3. Rejected chunks

    #[test]
    fn oversized_chunk_is_rejected() {
        let mut payload = 5u32.to_be_bytes().to_vec();
        payload.extend(write_wstring("x"));
        payload.resize(501, 0);
        let region = write_frame(FrameTag::Dcbi, &payload).unwrap();

        let table = build_binding_table(&region, &CodecOptions::default());
        assert!(table.is_empty());

        let relaxed = CodecOptions { max_binding_chunk_len: 1_000, ..Default::default() };
        let table = build_binding_table(&region, &relaxed);
        assert_eq!(table.get(5), Some("x"));
    }

    #[test]
    fn string_overrunning_chunk_is_rejected() {
        let mut payload = 2u32.to_be_bytes().to_vec();
        payload.extend(50u32.to_be_bytes());
        payload.extend([0, 0x41]);
        let region = write_frame(FrameTag::Dcbi, &payload).unwrap();

        assert!(build_binding_table(&region, &CodecOptions::default()).is_empty());
    }

    #[test]
    fn chunk_overrunning_region_is_rejected() {
        let mut region = dcbi(0, "Ch01.CC.001");
        region.truncate(region.len() - 2);
        assert!(build_binding_table(&region, &CodecOptions::default()).is_empty());
    }

    #[test]
    fn chunk_pass_only_reads_the_given_container() {
        // Text before the binding list that happens to form a DCBI chunk.
        let mut region = dcbi(0, "X");
        let bindings = dcbi(0, "Ch01.CC.010");
        region.extend(&bindings);

        let table = build_binding_table_from(&bindings, &[], &CodecOptions::default());
        assert_eq!(table.get(0), Some("Ch01.CC.010"));

        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.get(0), Some("X"));
    }

    #[test]
    fn definition_pass_only_reads_the_given_container() {
        let stray = button("Ch09.CC.099");
        let definitions = button("Ch01.CC.010");

        let table = build_binding_table_from(&[], &definitions, &CodecOptions::default());
        assert_eq!(table.get(0), Some("Ch01.CC.010"));
        assert_eq!(table.fallback, 1);

        let table = build_binding_table_from(&stray, &definitions, &CodecOptions::default());
        assert_eq!(table.get(0), Some("Ch01.CC.010"));
    }

    #[test]
    fn unknown_id_resolves_to_placeholder() {
        let table = build_binding_table(&[], &CodecOptions::default());
        assert_eq!(table.resolve(42), ("Ctrl_42".to_string(), false));
    }

// # ✅ 4. Allocation

    #[test]
    fn allocator_collapses_duplicate_descriptors() {
        let mut alloc = BindingAllocator::new();
        assert_eq!(alloc.assign("Ch01.CC.010", ControllerType::Button, None), Ok(0));
        assert_eq!(alloc.assign("Ch01.Note.C4", ControllerType::Button, None), Ok(1));
        assert_eq!(alloc.assign("Ch01.CC.010", ControllerType::FaderOrKnob, None), Ok(0));
        assert_eq!(alloc.len(), 2);

        let first = &alloc.definitions()[0];
        assert_eq!(first.descriptor, "Ch01.CC.010");
        assert_eq!(first.control_type, ControllerType::Button.to_wire());
    }

    #[test]
    fn written_bindings_rebuild_the_same_table() {
        let mut alloc = BindingAllocator::new();
        for d in ["Ch01.CC.001", "Ch02.Note.E3", "Ch16.CC.127"] {
            alloc.assign(d, ControllerType::Encoder, Some(EncoderMode::Mode7Fh01h)).unwrap();
        }

        let mut w = FrameWriter::new();
        alloc.write_bindings(&mut w).unwrap();
        for def in alloc.definitions() {
            w.frame(FrameTag::Dcdt, |w| {
                def.write(w);
                Ok::<(), tsi_core::framing::FrameError>(())
            })
            .unwrap();
        }
        let region = w.into_bytes();
        assert_eq!(scan_frames(&region, FrameTag::Dcbi).count(), 3);

        let table = build_binding_table(&region, &CodecOptions::default());
        assert_eq!(table.primary, 3);
        assert_eq!(table.get(2), Some("Ch16.CC.127"));
        assert_eq!(table.encoder_mode("Ch02.Note.E3"), Some(EncoderMode::Mode7Fh01h));
    }

    #[test]
    fn first_encoder_sets_mode_of_shared_control() {
        let mut alloc = BindingAllocator::new();
        assert_eq!(alloc.assign("Ch01.CC.010", ControllerType::Led, None), Ok(0));
        assert_eq!(alloc.assign("Ch01.CC.010", ControllerType::Encoder, Some(EncoderMode::Mode7Fh01h)), Ok(0));
        assert_eq!(alloc.assign("Ch01.CC.010", ControllerType::Button, None), Ok(0));

        let def = &alloc.definitions()[0];
        assert_eq!(def.control_type, ControllerType::Encoder.to_wire());
        assert_eq!(def.encoder_mode, EncoderMode::Mode7Fh01h);
    }

    #[test]
    fn conflicting_encoder_modes_are_refused() {
        let mut alloc = BindingAllocator::new();
        alloc.assign("Ch02.CC.020", ControllerType::Encoder, Some(EncoderMode::Mode3Fh41h)).unwrap();
        assert_eq!(alloc.assign("Ch02.CC.020", ControllerType::Encoder, Some(EncoderMode::Mode3Fh41h)), Ok(0));

        let err = alloc.assign("Ch02.CC.020", ControllerType::Encoder, Some(EncoderMode::Mode7Fh01h)).unwrap_err();
        assert_eq!(
            err,
            ModelError::EncoderModeConflict {
                control: "Ch02.CC.020".to_string(),
                first: EncoderMode::Mode3Fh41h,
                second: EncoderMode::Mode7Fh01h,
            }
        );
        assert_eq!(alloc.definitions()[0].encoder_mode, EncoderMode::Mode3Fh41h);
    }
}
