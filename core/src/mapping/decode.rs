use tracing::trace;

use crate::binding::BindingTable;
use crate::catalog::{command_name, CommandCatalog};
use crate::config::CodecOptions;
use crate::constants::{CMAD_OUTPUT_TAIL_LEN, CMAI_HEADER_LEN, UNASSIGNED_COMMAND_ID};
use crate::framing::{find_frame_from, read_frame, ByteReader, FrameError, FrameTag};
use crate::midi::{parse_channel, MidiControl};
use crate::model::{
    ControllerType, Direction, InteractionMode, MappingEntry, ModifierCondition, OutputSettings, Target,
};
use crate::wstring::decode_utf16be;

/// Per-device inputs shared by every mapping decode.
#[derive(Clone, Copy)]
pub struct MappingContext<'a> {
    pub table: &'a BindingTable,
    pub catalog: &'a dyn CommandCatalog,
    pub opts: &'a CodecOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMapping {
    pub entry: MappingEntry,
    /// False when the binding id fell back to the `Ctrl_{id}` placeholder.
    pub resolved: bool,
    pub binding_id: u32,
}

/// Decoded `CMAD` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub controller: ControllerType,
    pub interaction: InteractionMode,
    pub target: Target,
    pub auto_repeat: bool,
    pub invert: bool,
    pub soft_takeover: bool,
    pub rotary_sensitivity: f32,
    pub rotary_acceleration: f32,
    pub set_to_value: f32,
    pub comment: String,
    pub modifiers: [Option<ModifierCondition>; 2],
    pub output: OutputSettings,
}

/// Decode one `CMAI` payload.
///
/// # Returns
/// - `Ok(Some(_))` for a regular mapping.
/// - `Ok(None)` for the command-id-0 sentinel (intentionally unassigned).
/// - `Err(_)` when the record is truncated or corrupt; the caller skips it.
pub fn decode_mapping(payload: &[u8], ctx: MappingContext<'_>) -> Result<Option<DecodedMapping>, FrameError> {
    let mut r = ByteReader::new(payload);
    let binding_id = r.read_u32()?;
    let raw_direction = r.read_u32()?;
    let command_id = r.read_u32()?;

    if command_id == UNASSIGNED_COMMAND_ID {
        trace!(binding_id, "unassigned mapping slot");
        return Ok(None);
    }

    let direction = Direction::from_wire(raw_direction)
        .ok_or(FrameError::InvalidValue { field: "direction", value: raw_direction })?;

    let cmad = match read_frame(payload, CMAI_HEADER_LEN) {
        Ok((frame, _)) if frame.is(FrameTag::Cmad) => frame,
        _ => find_frame_from(payload, CMAI_HEADER_LEN, FrameTag::Cmad)
            .ok_or(FrameError::Missing { tag: FrameTag::Cmad })?,
    };
    let settings = decode_settings(cmad.payload, direction, ctx.opts)?;

    let (descriptor, resolved) = ctx.table.resolve(binding_id);
    let mut entry = MappingEntry::new(command_name(ctx.catalog, command_id), direction);
    match MidiControl::parse(&descriptor) {
        Some(control) => entry.set_control(control),
        None => entry.channel = parse_channel(&descriptor),
    }

    entry.controller = settings.controller;
    entry.interaction = settings.interaction;
    entry.target = settings.target;
    entry.invert = settings.invert;
    entry.soft_takeover = settings.soft_takeover;
    entry.rotary_sensitivity = settings.rotary_sensitivity;
    entry.rotary_acceleration = settings.rotary_acceleration;
    entry.set_to_value = settings.set_to_value;
    entry.comment = settings.comment;
    entry.modifiers = settings.modifiers;
    entry.output = settings.output;
    if entry.controller == ControllerType::Encoder {
        entry.encoder_mode = Some(ctx.table.encoder_mode(&descriptor).unwrap_or_default());
    }

    Ok(Some(DecodedMapping { entry, resolved, binding_id }))
}

/// Decode a `CMAD` payload.
///
/// The modifier block follows the comment, so its offset depends on
/// `comment_len`. A length of 0, one at or above `max_comment_chars`, or one
/// that overruns the block means there is no comment and the modifiers sit
/// right after the 52-byte prefix.
pub fn decode_settings(payload: &[u8], direction: Direction, opts: &CodecOptions) -> Result<Settings, FrameError> {
    let mut r = ByteReader::new(payload);

    let _marker = r.read_u32()?;
    let controller = ControllerType::from_wire(r.read_u32()?);
    let interaction = InteractionMode::from_wire(r.read_u32()?, direction);
    let target = Target::from_wire(r.read_i32()?);
    let auto_repeat = r.read_u32()? != 0;
    let invert = r.read_u32()? != 0;
    let soft_takeover = r.read_u32()? != 0;
    let rotary_sensitivity = r.read_f32()?;
    let rotary_acceleration = r.read_f32()?;
    r.skip(8)?;
    let set_to_value = r.read_f32()?;
    let comment_len = r.read_u32()?;

    let comment = match (comment_len as usize).checked_mul(2) {
        Some(bytes) if comment_len != 0 && comment_len < opts.max_comment_chars && bytes <= r.remaining() => {
            decode_utf16be(r.read_bytes(bytes)?)
        }
        _ => String::new(),
    };

    let mod1 = (r.read_u32()?, r.read_u32()?);
    let mod2 = (r.read_u32()?, r.read_u32()?);
    let modifiers = [
        ModifierCondition::from_wire(mod1.0, mod1.1),
        ModifierCondition::from_wire(mod2.0, mod2.1),
    ];

    let output = if r.remaining() >= CMAD_OUTPUT_TAIL_LEN {
        OutputSettings {
            value_ui_type: r.read_u32()?,
            led_min: r.read_f32()?,
            led_max: r.read_f32()?,
            midi_min: r.read_u32()?,
            midi_max: r.read_u32()?,
            led_invert: r.read_u32()? != 0,
            led_blend: r.read_u32()? != 0,
        }
    } else {
        OutputSettings::default()
    };

    Ok(Settings {
        controller,
        interaction,
        target,
        auto_repeat,
        invert,
        soft_takeover,
        rotary_sensitivity,
        rotary_acceleration,
        set_to_value,
        comment,
        modifiers,
        output,
    })
}
