use serde::{Deserialize, Serialize};

use crate::midi::{ControlKind, MidiControl, DEFAULT_CHANNEL};
use crate::model::types::{
    ControllerType, Direction, EncoderMode, InteractionMode, ModifierCondition, OutputSettings, Target,
};

pub const DEFAULT_ROTARY_SENSITIVITY: f32 = 1.0;
pub const DEFAULT_ROTARY_ACCELERATION: f32 = 0.0;
pub const DEFAULT_SET_TO_VALUE: f32 = 0.0;

/// One command bound to one MIDI control.
///
/// `note` and `cc` are mutually exclusive; both `None` means the control is
/// unassigned. Encoding rejects entries with both set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Position within the device, assigned in file order on decode.
    pub id: usize,
    pub command: String,
    pub direction: Direction,
    pub target: Target,
    pub interaction: InteractionMode,
    /// 1..=16
    pub channel: u8,
    pub note: Option<u8>,
    pub cc: Option<u8>,
    /// Empty when the mapping carries no comment.
    pub comment: String,
    pub controller: ControllerType,
    pub invert: bool,
    pub soft_takeover: bool,
    /// 0.0..=1.0
    pub set_to_value: f32,
    /// 0.0..=3.0
    pub rotary_sensitivity: f32,
    /// 0.0..=1.0
    pub rotary_acceleration: f32,
    /// Only meaningful for encoders; `None` for every other controller type.
    pub encoder_mode: Option<EncoderMode>,
    pub modifiers: [Option<ModifierCondition>; 2],
    pub output: OutputSettings,
}

impl MappingEntry {
    /// Entry with the defaults Traktor uses for a fresh mapping.
    pub fn new(command: impl Into<String>, direction: Direction) -> Self {
        let (interaction, controller) = match direction {
            Direction::In => (InteractionMode::Hold, ControllerType::Button),
            Direction::Out => (InteractionMode::Output, ControllerType::Led),
        };
        Self {
            id: 0,
            command: command.into(),
            direction,
            target: Target::DeviceDefault,
            interaction,
            channel: DEFAULT_CHANNEL,
            note: None,
            cc: None,
            comment: String::new(),
            controller,
            invert: false,
            soft_takeover: false,
            set_to_value: DEFAULT_SET_TO_VALUE,
            rotary_sensitivity: DEFAULT_ROTARY_SENSITIVITY,
            rotary_acceleration: DEFAULT_ROTARY_ACCELERATION,
            encoder_mode: None,
            modifiers: [None, None],
            output: OutputSettings::default(),
        }
    }

    /// Builder-style control assignment.
    pub fn with_control(mut self, control: MidiControl) -> Self {
        self.set_control(control);
        self
    }

    pub fn set_control(&mut self, control: MidiControl) {
        self.channel = control.channel;
        let (note, cc) = match control.kind {
            ControlKind::Note(n) => (Some(n), None),
            ControlKind::Cc(c) => (None, Some(c)),
            ControlKind::Unassigned => (None, None),
        };
        self.note = note;
        self.cc = cc;
    }

    /// Control this entry is bound to, or `None` if both note and CC are set.
    pub fn control(&self) -> Option<MidiControl> {
        let kind = match (self.note, self.cc) {
            (Some(n), None) => ControlKind::Note(n),
            (None, Some(c)) => ControlKind::Cc(c),
            (None, None) => ControlKind::Unassigned,
            (Some(_), Some(_)) => return None,
        };
        Some(MidiControl { channel: self.channel, kind })
    }

    #[inline]
    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }

    pub fn modifier_conditions(&self) -> impl Iterator<Item = &ModifierCondition> {
        self.modifiers.iter().flatten()
    }
}
