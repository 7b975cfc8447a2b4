// MIDI control descriptors:
//
// * `Ch{nn}.CC.{nnn}` / `Ch{nn}.Note.{name}{octave}` formatting
// * note numbering (60 = C4, 0 = C-1)
// * lenient channel parsing, strict kind / note parsing

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tsi_core::midi::{note_name, note_number, parse_channel, ControlKind, MidiControl};

// # ✅ 1. Formatting

    #[test]
    fn cc_is_zero_padded() {
        assert_eq!(MidiControl::cc(1, 7).to_string(), "Ch01.CC.007");
        assert_eq!(MidiControl::cc(16, 127).to_string(), "Ch16.CC.127");
    }

    #[test]
    fn notes_use_sharps_and_octaves() {
        assert_eq!(MidiControl::note(2, 60).to_string(), "Ch02.Note.C4");
        assert_eq!(MidiControl::note(10, 75).to_string(), "Ch10.Note.D#5");
        assert_eq!(MidiControl::note(1, 0).to_string(), "Ch01.Note.C-1");
        assert_eq!(MidiControl::note(1, 127).to_string(), "Ch01.Note.G9");
    }

    #[test]
    fn unassigned_keeps_channel() {
        let control = MidiControl::unassigned(3);
        assert_eq!(control.to_string(), "Ch03.Unassigned");
        assert_eq!(MidiControl::parse("Ch03.Unassigned"), Some(control));
        assert_eq!(control.value(), None);
    }

// # ✅ 2. Parsing

    #[test]
    fn parses_known_descriptors() {
        assert_eq!(MidiControl::parse("Ch01.CC.010"), Some(MidiControl::cc(1, 10)));
        assert_eq!(MidiControl::parse("Ch05.Note.A#3"), Some(MidiControl::note(5, 58)));
        assert_eq!(MidiControl::parse("Ch16.Note.C-1"), Some(MidiControl::note(16, 0)));
    }

    #[test]
    fn note_name_table() {
        assert_eq!(note_number("C-1"), Some(0));
        assert_eq!(note_number("C4"), Some(60));
        assert_eq!(note_number("D#5"), Some(75));
        assert_eq!(note_number("G9"), Some(127));
        assert_eq!(note_name(61), "C#4");
    }

    #[test]
    fn unknown_note_letter_is_rejected() {
        assert_eq!(MidiControl::parse("Ch01.Note.H4"), None);
        assert_eq!(note_number("Db4"), None);
        assert_eq!(note_number(""), None);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(note_number("G#9"), None);
        assert_eq!(note_number("C-2"), None);
        assert_eq!(note_number("C99999"), None);
        assert_eq!(MidiControl::parse("Ch01.CC.128"), None);
        assert_eq!(MidiControl::parse("Ch01.CC.abc"), None);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert_eq!(MidiControl::parse("Ch01.PB.000"), None);
        assert_eq!(MidiControl::parse("Ctrl_7"), None);
        assert_eq!(MidiControl::parse(""), None);
    }

    #[test]
    fn garbled_channel_defaults_to_one() {
        assert_eq!(parse_channel("Ch07"), 7);
        assert_eq!(parse_channel("Chx"), 1);
        assert_eq!(parse_channel("Ch00"), 1);
        assert_eq!(parse_channel("Ch17"), 1);
        assert_eq!(parse_channel("Ctrl_3"), 1);
        assert_eq!(MidiControl::parse("ChXX.CC.001"), Some(MidiControl::cc(1, 1)));
    }

// # ✅ 3. Property: every channel x note / CC round-trips

    proptest! {
        #[test]
        fn cc_roundtrip(channel in 1u8..=16, cc in 0u8..=127) {
            let control = MidiControl::cc(channel, cc);
            prop_assert_eq!(MidiControl::parse(&control.to_string()), Some(control));
        }

        #[test]
        fn note_roundtrip(channel in 1u8..=16, note in 0u8..=127) {
            let control = MidiControl::note(channel, note);
            let parsed = MidiControl::parse(&control.to_string());
            prop_assert_eq!(parsed, Some(control));
            prop_assert!(matches!(parsed.map(|c| c.kind), Some(ControlKind::Note(_))));
        }
    }

    #[test]
    fn exhaustive_channel_grid() {
        for channel in 1..=16u8 {
            for value in 0..=127u8 {
                for control in [MidiControl::cc(channel, value), MidiControl::note(channel, value)] {
                    assert_eq!(MidiControl::parse(&control.to_string()), Some(control));
                }
            }
        }
    }
}
