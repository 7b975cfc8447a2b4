//! Enumerated fields of a mapping and their wire registries.
//!
//! Decoding is total (unknown raw values map to a fallback variant).
//! Encoding of `Unassigned` is lossy: the format has no sentinel for it, so
//! each enum substitutes an explicit default.

use serde::{Deserialize, Serialize};

use crate::constants::{controller_ids, interaction_ids, target_ids};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn from_wire(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Direction::In),
            1 => Some(Direction::Out),
            _ => None,
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            Direction::In => 0,
            Direction::Out => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerType {
    Button,
    FaderOrKnob,
    Encoder,
    Led,
    Unassigned,
}

impl ControllerType {
    pub fn from_wire(raw: u32) -> Self {
        match raw {
            controller_ids::BUTTON => ControllerType::Button,
            controller_ids::FADER_OR_KNOB => ControllerType::FaderOrKnob,
            controller_ids::ENCODER => ControllerType::Encoder,
            controller_ids::LED => ControllerType::Led,
            _ => ControllerType::Unassigned,
        }
    }

    /// `Unassigned` encodes as a button.
    pub fn to_wire(self) -> u32 {
        match self {
            ControllerType::Button => controller_ids::BUTTON,
            ControllerType::FaderOrKnob => controller_ids::FADER_OR_KNOB,
            ControllerType::Encoder => controller_ids::ENCODER,
            ControllerType::Led => controller_ids::LED,
            ControllerType::Unassigned => controller_ids::BUTTON,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionMode {
    Toggle,
    Hold,
    Direct,
    Relative,
    Increment,
    Decrement,
    Reset,
    Output,
    Trigger,
    Unassigned,
}

impl InteractionMode {
    /// Unknown values become `Hold` for inputs and `Output` for outputs.
    pub fn from_wire(raw: u32, direction: Direction) -> Self {
        match raw {
            interaction_ids::TOGGLE => InteractionMode::Toggle,
            interaction_ids::HOLD => InteractionMode::Hold,
            interaction_ids::DIRECT => InteractionMode::Direct,
            interaction_ids::RELATIVE => InteractionMode::Relative,
            interaction_ids::INCREMENT => InteractionMode::Increment,
            interaction_ids::DECREMENT => InteractionMode::Decrement,
            interaction_ids::RESET => InteractionMode::Reset,
            interaction_ids::OUTPUT => InteractionMode::Output,
            interaction_ids::TRIGGER => InteractionMode::Trigger,
            _ => match direction {
                Direction::In => InteractionMode::Hold,
                Direction::Out => InteractionMode::Output,
            },
        }
    }

    /// `Unassigned` encodes as hold.
    pub fn to_wire(self) -> u32 {
        match self {
            InteractionMode::Toggle => interaction_ids::TOGGLE,
            InteractionMode::Hold => interaction_ids::HOLD,
            InteractionMode::Direct => interaction_ids::DIRECT,
            InteractionMode::Relative => interaction_ids::RELATIVE,
            InteractionMode::Increment => interaction_ids::INCREMENT,
            InteractionMode::Decrement => interaction_ids::DECREMENT,
            InteractionMode::Reset => interaction_ids::RESET,
            InteractionMode::Output => interaction_ids::OUTPUT,
            InteractionMode::Trigger => interaction_ids::TRIGGER,
            InteractionMode::Unassigned => interaction_ids::HOLD,
        }
    }
}

/// Deck / FX unit / global context a mapping applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    DeviceDefault,
    Global,
    DeckA,
    DeckB,
    DeckC,
    DeckD,
    FxUnit1,
    FxUnit2,
    FxUnit3,
    FxUnit4,
    Unassigned,
}

impl Target {
    pub fn from_wire(raw: i32) -> Self {
        match raw {
            target_ids::DEVICE_DEFAULT => Target::DeviceDefault,
            target_ids::GLOBAL => Target::Global,
            target_ids::DECK_A => Target::DeckA,
            target_ids::DECK_B => Target::DeckB,
            target_ids::DECK_C => Target::DeckC,
            target_ids::DECK_D => Target::DeckD,
            target_ids::FX_UNIT_1 => Target::FxUnit1,
            target_ids::FX_UNIT_2 => Target::FxUnit2,
            target_ids::FX_UNIT_3 => Target::FxUnit3,
            target_ids::FX_UNIT_4 => Target::FxUnit4,
            _ => Target::Unassigned,
        }
    }

    /// `Unassigned` encodes as global.
    pub fn to_wire(self) -> i32 {
        match self {
            Target::DeviceDefault => target_ids::DEVICE_DEFAULT,
            Target::Global => target_ids::GLOBAL,
            Target::DeckA => target_ids::DECK_A,
            Target::DeckB => target_ids::DECK_B,
            Target::DeckC => target_ids::DECK_C,
            Target::DeckD => target_ids::DECK_D,
            Target::FxUnit1 => target_ids::FX_UNIT_1,
            Target::FxUnit2 => target_ids::FX_UNIT_2,
            Target::FxUnit3 => target_ids::FX_UNIT_3,
            Target::FxUnit4 => target_ids::FX_UNIT_4,
            Target::Unassigned => target_ids::GLOBAL,
        }
    }
}

/// Relative encoder protocol, stored with the control definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EncoderMode {
    /// 3Fh decrements, 41h increments.
    #[default]
    Mode3Fh41h,
    /// 7Fh decrements, 01h increments.
    Mode7Fh01h,
}

impl EncoderMode {
    pub fn from_wire(raw: u32) -> Self {
        match raw {
            1 => EncoderMode::Mode7Fh01h,
            _ => EncoderMode::Mode3Fh41h,
        }
    }

    pub fn to_wire(self) -> u32 {
        match self {
            EncoderMode::Mode3Fh41h => 0,
            EncoderMode::Mode7Fh01h => 1,
        }
    }
}

/// Modifier condition; only ever stored when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierCondition {
    /// 1..=8
    pub modifier: u8,
    /// 0..=7
    pub value: u8,
}

impl ModifierCondition {
    pub const MAX_MODIFIER: u8 = 8;
    pub const MAX_VALUE: u8 = 7;

    pub fn new(modifier: u8, value: u8) -> Self {
        Self { modifier, value }
    }

    /// Wire pair -> condition. Id 0 means "no condition"; out-of-range pairs
    /// are dropped as well.
    pub fn from_wire(id: u32, value: u32) -> Option<Self> {
        let modifier = u8::try_from(id).ok().filter(|m| (1..=Self::MAX_MODIFIER).contains(m))?;
        let value = u8::try_from(value).ok().filter(|v| *v <= Self::MAX_VALUE)?;
        Some(Self { modifier, value })
    }

    pub fn to_wire(condition: Option<Self>) -> (u32, u32) {
        match condition {
            Some(c) => (u32::from(c.modifier), u32::from(c.value)),
            None => (0, 0),
        }
    }
}

/// LED / output range settings carried after the modifier conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub value_ui_type: u32,
    pub led_min: f32,
    pub led_max: f32,
    pub midi_min: u32,
    pub midi_max: u32,
    pub led_invert: bool,
    pub led_blend: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            value_ui_type: 0,
            led_min: 0.0,
            led_max: 1.0,
            midi_min: 0,
            midi_max: 127,
            led_invert: false,
            led_blend: false,
        }
    }
}
