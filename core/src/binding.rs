//! binding.rs
//! Binding id <-> MIDI control descriptor tables.
//!
//! Decode side, two passes:
//! 1. every `DCBI` chunk: `{binding_id: u32, len: u32, UTF-16BE[len]}`
//! 2. every `DCDT` definition: its leading wide string fills binding id N
//!    (N = occurrence index) only when pass 1 left that id empty.
//!
//! Pass 1 reads the `DCBM` payload and pass 2 the `DDDC` payload when the
//! device has them; the whole device region is the fallback, since mapping
//! comments there can spell either tag. Both passes move one byte on a
//! miss; chunk boundaries are not reliably aligned.
//!
//! Encode side, `BindingAllocator` hands out sequential ids to unique
//! descriptors in first-seen order. The first `Encoder` mapping on a
//! descriptor sets its control type and encoder mode.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::CodecOptions;
use crate::constants::FRAME_HEADER_LEN;
use crate::framing::{scan_frames, ByteReader, FrameTag, FrameWriter};
use crate::model::{ControllerType, EncoderMode, ModelError};
use crate::wstring::{decode_utf16be, put_wstring, read_wstring_from};

/// One `DCDT` control definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlDefinition {
    pub descriptor: String,
    pub control_type: u32,
    pub min: f32,
    pub max: f32,
    pub encoder_mode: EncoderMode,
}

impl ControlDefinition {
    pub fn new(descriptor: impl Into<String>, controller: ControllerType, encoder_mode: EncoderMode) -> Self {
        Self {
            descriptor: descriptor.into(),
            control_type: controller.to_wire(),
            min: 0.0,
            max: 1.0,
            encoder_mode,
        }
    }

    /// Parse a DCDT payload. Only the descriptor is required; trailing
    /// fields fall back to defaults when the payload is short.
    pub fn parse(payload: &[u8], opts: &CodecOptions) -> Option<Self> {
        let mut r = ByteReader::new(payload);
        let descriptor = read_wstring_from(&mut r, opts.max_wstring_chars).ok()?;
        let control_type = r.read_u32().unwrap_or_default();
        let min = r.read_f32().unwrap_or(0.0);
        let max = r.read_f32().unwrap_or(1.0);
        let encoder_mode = r.read_u32().map(EncoderMode::from_wire).unwrap_or_default();
        Some(Self { descriptor, control_type, min, max, encoder_mode })
    }

    pub fn write(&self, w: &mut FrameWriter) {
        put_wstring(w, &self.descriptor);
        w.put_u32(self.control_type);
        w.put_f32(self.min);
        w.put_f32(self.max);
        w.put_u32(self.encoder_mode.to_wire());
    }
}

/// Decode-time lookup built from one device region.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: BTreeMap<u32, String>,
    encoder_modes: HashMap<String, EncoderMode>,
    pub primary: usize,
    pub fallback: usize,
}

impl BindingTable {
    pub fn get(&self, binding_id: u32) -> Option<&str> {
        self.entries.get(&binding_id).map(String::as_str)
    }

    /// Descriptor for `binding_id`, or the `Ctrl_{id}` placeholder.
    pub fn resolve(&self, binding_id: u32) -> (String, bool) {
        match self.get(binding_id) {
            Some(d) => (d.to_string(), true),
            None => (format!("Ctrl_{binding_id}"), false),
        }
    }

    pub fn encoder_mode(&self, descriptor: &str) -> Option<EncoderMode> {
        self.encoder_modes.get(descriptor).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries.iter().map(|(id, d)| (*id, d.as_str()))
    }

    /// Primary entries only keep the first chunk seen for an id.
    fn insert_primary(&mut self, binding_id: u32, descriptor: String) {
        if let std::collections::btree_map::Entry::Vacant(slot) = self.entries.entry(binding_id) {
            slot.insert(descriptor);
            self.primary += 1;
        }
    }

    fn insert_fallback(&mut self, binding_id: u32, descriptor: String) {
        if let std::collections::btree_map::Entry::Vacant(slot) = self.entries.entry(binding_id) {
            slot.insert(descriptor);
            self.fallback += 1;
        }
    }
}

/// Build the binding table by scanning one whole device region.
#[inline]
pub fn build_binding_table(region: &[u8], opts: &CodecOptions) -> BindingTable {
    build_binding_table_from(region, region, opts)
}

/// Build the binding table from `chunks` (DCBI pass) and `definitions`
/// (DCDT pass).
pub fn build_binding_table_from(chunks: &[u8], definitions: &[u8], opts: &CodecOptions) -> BindingTable {
    let mut table = BindingTable::default();
    let needle = FrameTag::Dcbi.bytes();

    let mut pos = 0usize;
    while pos + FRAME_HEADER_LEN <= chunks.len() {
        if chunks[pos..pos + 4] == needle {
            if let Some((binding_id, descriptor, consumed)) = parse_binding_chunk(chunks, pos, opts) {
                table.insert_primary(binding_id, descriptor);
                pos += consumed;
                continue;
            }
        }
        pos += 1;
    }

    for (index, frame) in scan_frames(definitions, FrameTag::Dcdt).enumerate() {
        let Some(def) = ControlDefinition::parse(frame.payload, opts) else {
            continue;
        };
        table.encoder_modes.entry(def.descriptor.clone()).or_insert(def.encoder_mode);
        if let Ok(binding_id) = u32::try_from(index) {
            table.insert_fallback(binding_id, def.descriptor);
        }
    }

    debug!(primary = table.primary, fallback = table.fallback, "binding table built");
    table
}

/// Parse a DCBI chunk at `pos`; `None` rejects the candidate.
fn parse_binding_chunk(region: &[u8], pos: usize, opts: &CodecOptions) -> Option<(u32, String, usize)> {
    let mut header = ByteReader::at(region, pos + 4);
    let size = header.read_u32().ok()?;
    if size > opts.max_binding_chunk_len {
        return None;
    }
    let start = pos + FRAME_HEADER_LEN;
    let payload = region.get(start..start + size as usize)?;

    let mut r = ByteReader::new(payload);
    let binding_id = r.read_u32().ok()?;
    let chars = r.read_u32().ok()?;
    let byte_len = (chars as usize).checked_mul(2)?;
    if byte_len > r.remaining() {
        return None;
    }
    let raw = r.read_bytes(byte_len).ok()?;
    Some((binding_id, decode_utf16be(raw), FRAME_HEADER_LEN + size as usize))
}

/// Encode-time id assignment: one id per unique descriptor, first seen first.
#[derive(Debug, Default)]
pub struct BindingAllocator {
    ids: HashMap<String, u32>,
    definitions: Vec<ControlDefinition>,
    /// Mode fixed by the first `Encoder` mapping, per binding id.
    encoder_modes: Vec<Option<EncoderMode>>,
}

impl BindingAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `descriptor`.
    ///
    /// The first caller defines the control until an `Encoder` mapping
    /// arrives; that one sets the control type and encoder mode. A later
    /// encoder asking for a different mode is refused, since the file keeps
    /// one mode per control.
    pub fn assign(
        &mut self,
        descriptor: &str,
        controller: ControllerType,
        encoder_mode: Option<EncoderMode>,
    ) -> Result<u32, ModelError> {
        let mode = (controller == ControllerType::Encoder).then(|| encoder_mode.unwrap_or_default());

        let Some(&id) = self.ids.get(descriptor) else {
            let id = self.definitions.len() as u32;
            self.ids.insert(descriptor.to_string(), id);
            self.definitions
                .push(ControlDefinition::new(descriptor, controller, mode.unwrap_or_default()));
            self.encoder_modes.push(mode);
            return Ok(id);
        };

        let (Some(mode), Some(fixed), Some(def)) = (
            mode,
            self.encoder_modes.get_mut(id as usize),
            self.definitions.get_mut(id as usize),
        ) else {
            return Ok(id);
        };
        match *fixed {
            None => {
                *fixed = Some(mode);
                def.control_type = controller.to_wire();
                def.encoder_mode = mode;
            }
            Some(existing) if existing != mode => {
                return Err(ModelError::EncoderModeConflict {
                    control: descriptor.to_string(),
                    first: existing,
                    second: mode,
                });
            }
            Some(_) => {}
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in binding-id order.
    pub fn definitions(&self) -> &[ControlDefinition] {
        &self.definitions
    }

    /// Write one DCBI chunk per binding, in id order.
    pub fn write_bindings(&self, w: &mut FrameWriter) -> Result<(), crate::framing::FrameError> {
        for (id, def) in self.definitions.iter().enumerate() {
            w.frame(FrameTag::Dcbi, |w| {
                w.put_u32(id as u32);
                put_wstring(w, &def.descriptor);
                Ok::<(), crate::framing::FrameError>(())
            })?;
        }
        Ok(())
    }
}
