//! midi.rs
//! MIDI control descriptors: `Ch{nn}.CC.{nnn}` and `Ch{nn}.Note.{name}{octave}`.
//!
//! Design notes:
//! - Note numbers use `(octave + 1) * 12 + index`, so 60 is `C4` and 0 is `C-1`.
//! - Encoding emits sharps only; decoding accepts exactly what encoding emits.
//! - A garbled channel falls back to 1 instead of failing the descriptor.

use std::fmt;

pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

pub const DEFAULT_CHANNEL: u8 = 1;
pub const MAX_CHANNEL: u8 = 16;
pub const MAX_DATA_VALUE: u8 = 127;

const CC_KIND: &str = "CC";
const NOTE_KIND: &str = "Note";
const UNASSIGNED_KIND: &str = "Unassigned";

/// Which message a control descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Cc(u8),
    Note(u8),
    /// Channel is known but no message is bound.
    Unassigned,
}

/// Decoded control descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MidiControl {
    pub channel: u8,
    pub kind: ControlKind,
}

impl MidiControl {
    pub fn cc(channel: u8, number: u8) -> Self {
        Self { channel, kind: ControlKind::Cc(number) }
    }

    pub fn note(channel: u8, number: u8) -> Self {
        Self { channel, kind: ControlKind::Note(number) }
    }

    pub fn unassigned(channel: u8) -> Self {
        Self { channel, kind: ControlKind::Unassigned }
    }

    #[inline]
    pub fn is_cc(&self) -> bool {
        matches!(self.kind, ControlKind::Cc(_))
    }

    /// Data byte for CC / note controls.
    pub fn value(&self) -> Option<u8> {
        match self.kind {
            ControlKind::Cc(v) | ControlKind::Note(v) => Some(v),
            ControlKind::Unassigned => None,
        }
    }

    /// Parse a descriptor string.
    ///
    /// Returns `None` for an unknown kind, an unknown note letter, or a value
    /// outside 0..=127.
    pub fn parse(descriptor: &str) -> Option<Self> {
        let mut parts = descriptor.splitn(3, '.');
        let channel = parse_channel(parts.next().unwrap_or_default());
        let kind = match (parts.next(), parts.next()) {
            (Some(CC_KIND), Some(value)) => ControlKind::Cc(parse_data_value(value)?),
            (Some(NOTE_KIND), Some(name)) => ControlKind::Note(note_number(name)?),
            (Some(UNASSIGNED_KIND), None) => ControlKind::Unassigned,
            _ => return None,
        };
        Some(Self { channel, kind })
    }
}

impl fmt::Display for MidiControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ControlKind::Cc(cc) => write!(f, "Ch{:02}.{}.{:03}", self.channel, CC_KIND, cc),
            ControlKind::Note(n) => write!(f, "Ch{:02}.{}.{}", self.channel, NOTE_KIND, note_name(n)),
            ControlKind::Unassigned => write!(f, "Ch{:02}.{}", self.channel, UNASSIGNED_KIND),
        }
    }
}

/// `"Ch07"` -> 7; anything unparseable or out of 1..=16 -> 1.
pub fn parse_channel(part: &str) -> u8 {
    part.strip_prefix("Ch")
        .and_then(|digits| digits.parse::<u8>().ok())
        .filter(|ch| (1..=MAX_CHANNEL).contains(ch))
        .unwrap_or(DEFAULT_CHANNEL)
}

fn parse_data_value(s: &str) -> Option<u8> {
    s.parse::<u8>().ok().filter(|v| *v <= MAX_DATA_VALUE)
}

/// MIDI note number -> name with octave (`60` -> `"C4"`).
pub fn note_name(number: u8) -> String {
    let octave = i32::from(number / 12) - 1;
    format!("{}{}", NOTE_NAMES[usize::from(number % 12)], octave)
}

/// Name with octave -> MIDI note number (`"D#5"` -> `75`).
pub fn note_number(name: &str) -> Option<u8> {
    let (pitch, octave) = match name.get(..2) {
        Some(p) if p.ends_with('#') => (p, &name[2..]),
        _ => (name.get(..1)?, &name[1..]),
    };
    let index = NOTE_NAMES.iter().position(|n| *n == pitch)? as i32;
    let octave: i16 = octave.parse().ok()?;
    let number = (i32::from(octave) + 1) * 12 + index;
    u8::try_from(number).ok().filter(|n| *n <= MAX_DATA_VALUE)
}
