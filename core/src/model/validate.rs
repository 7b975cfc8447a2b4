//! Encode-side invariant checks.
//!
//! Every check runs before a single byte is emitted; a refused write beats a
//! half-written file.

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::config::CodecOptions;
use crate::midi::{MAX_CHANNEL, MAX_DATA_VALUE};
use crate::model::device::{Device, MappingFile};
use crate::model::entry::MappingEntry;
use crate::model::types::{ControllerType, EncoderMode, ModifierCondition};
use crate::types::TsiError;
use crate::wstring::wstring_units;

const SET_TO_RANGE: RangeInclusive<f32> = 0.0..=1.0;
const SENSITIVITY_RANGE: RangeInclusive<f32> = 0.0..=3.0;
const ACCELERATION_RANGE: RangeInclusive<f32> = 0.0..=1.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("note {note} and CC {cc} are both set")]
    NoteAndCc { note: u8, cc: u8 },

    #[error("MIDI channel {0} outside 1..=16")]
    ChannelOutOfRange(u8),

    #[error("{field} {value} outside 0..=127")]
    DataValueOutOfRange { field: &'static str, value: u8 },

    #[error("modifier condition M{modifier}={value} outside M1..=M8 / 0..=7")]
    ModifierOutOfRange { modifier: u8, value: u8 },

    #[error("{field} {value} outside {min}..={max}")]
    ValueOutOfRange { field: &'static str, value: f32, min: f32, max: f32 },

    #[error("{field} has {chars} UTF-16 units, limit {max}")]
    TextTooLong { field: &'static str, chars: usize, max: u32 },

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("{controller:?} mapping with encoder mode {encoder_mode:?}")]
    EncoderModeMismatch { controller: ControllerType, encoder_mode: Option<EncoderMode> },

    #[error("control {control} has encoders in both {first:?} and {second:?}")]
    EncoderModeConflict { control: String, first: EncoderMode, second: EncoderMode },
}

fn check_range(field: &'static str, value: f32, range: &RangeInclusive<f32>) -> Result<(), ModelError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ModelError::ValueOutOfRange { field, value, min: *range.start(), max: *range.end() })
    }
}

fn check_text(field: &'static str, text: &str, max: u32) -> Result<(), ModelError> {
    let chars = wstring_units(text);
    if chars >= max as usize {
        return Err(ModelError::TextTooLong { field, chars, max });
    }
    Ok(())
}

impl MappingEntry {
    /// Check against the default limits.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_with(&CodecOptions::default())
    }

    pub fn validate_with(&self, opts: &CodecOptions) -> Result<(), ModelError> {
        if let (Some(note), Some(cc)) = (self.note, self.cc) {
            return Err(ModelError::NoteAndCc { note, cc });
        }
        if !(1..=MAX_CHANNEL).contains(&self.channel) {
            return Err(ModelError::ChannelOutOfRange(self.channel));
        }
        for (field, value) in [("note", self.note), ("cc", self.cc)] {
            if let Some(v) = value.filter(|v| *v > MAX_DATA_VALUE) {
                return Err(ModelError::DataValueOutOfRange { field, value: v });
            }
        }
        for c in self.modifier_conditions() {
            if !(1..=ModifierCondition::MAX_MODIFIER).contains(&c.modifier) || c.value > ModifierCondition::MAX_VALUE {
                return Err(ModelError::ModifierOutOfRange { modifier: c.modifier, value: c.value });
            }
        }

        if (self.controller == ControllerType::Encoder) != self.encoder_mode.is_some() {
            return Err(ModelError::EncoderModeMismatch {
                controller: self.controller,
                encoder_mode: self.encoder_mode,
            });
        }

        check_range("set-to value", self.set_to_value, &SET_TO_RANGE)?;
        check_range("rotary sensitivity", self.rotary_sensitivity, &SENSITIVITY_RANGE)?;
        check_range("rotary acceleration", self.rotary_acceleration, &ACCELERATION_RANGE)?;

        check_text("comment", &self.comment, opts.max_comment_chars)
    }
}

impl Device {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_with(&CodecOptions::default())
    }

    pub fn validate_with(&self, opts: &CodecOptions) -> Result<(), ModelError> {
        let max = opts.max_wstring_chars;
        check_text("device name", &self.name, max)?;
        check_text("device comment", &self.comment, max)?;
        check_text("input port", &self.in_port, max)?;
        check_text("output port", &self.out_port, max)?;
        Ok(())
    }
}

impl MappingFile {
    /// Check every device and mapping; the error names the first offender.
    pub fn validate(&self) -> Result<(), TsiError> {
        self.validate_with(&CodecOptions::default())
    }

    /// Same checks, with the text limits the decoder will apply.
    pub fn validate_with(&self, opts: &CodecOptions) -> Result<(), TsiError> {
        for (device, dev) in self.devices.iter().enumerate() {
            dev.validate_with(opts)
                .map_err(|source| TsiError::InvalidModel { device, mapping: None, source })?;
            for entry in &dev.mappings {
                entry.validate_with(opts).map_err(|source| TsiError::InvalidModel {
                    device,
                    mapping: Some(entry.id),
                    source,
                })?;
            }
        }
        Ok(())
    }
}
