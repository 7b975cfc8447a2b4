use num_enum::TryFromPrimitive;
use thiserror::Error;

use crate::constants::tags;

/// Closed set of frame identifiers seen in TSI payloads.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum FrameTag {
    /// Root container.
    Diom = tags::DIOM,
    /// Format version.
    Dioi = tags::DIOI,
    /// Device list, count-prefixed.
    Devs = tags::DEVS,
    /// One device.
    Devi = tags::DEVI,
    /// Device data.
    Ddat = tags::DDAT,
    /// Device target info.
    Ddif = tags::DDIF,
    /// Device version info.
    Ddiv = tags::DDIV,
    /// Device comment.
    Ddic = tags::DDIC,
    /// Device ports.
    Ddpt = tags::DDPT,
    /// Control definitions container.
    Dddc = tags::DDDC,
    /// Input control definitions.
    Ddci = tags::DDCI,
    /// Output control definitions.
    Ddco = tags::DDCO,
    /// One control definition.
    Dcdt = tags::DCDT,
    /// Command bindings container.
    Ddcb = tags::DDCB,
    /// Mapping list, count-prefixed.
    Cmas = tags::CMAS,
    /// One mapping item.
    Cmai = tags::CMAI,
    /// Mapping settings block.
    Cmad = tags::CMAD,
    /// Binding chunk list, count-prefixed.
    Dcbm = tags::DCBM,
    /// One binding chunk.
    Dcbi = tags::DCBI,
    /// Device state.
    Dvst = tags::DVST,
}

impl FrameTag {
    #[inline(always)]
    pub const fn bytes(self) -> [u8; 4] {
        tags::bytes(self as u32)
    }

    #[inline]
    pub fn from_bytes(id: [u8; 4]) -> Option<Self> {
        Self::try_from_primitive(u32::from_be_bytes(id)).ok()
    }

    /// ASCII name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        use FrameTag::*;
        match self {
            Diom => "DIOM",
            Dioi => "DIOI",
            Devs => "DEVS",
            Devi => "DEVI",
            Ddat => "DDAT",
            Ddif => "DDIF",
            Ddiv => "DDIV",
            Ddic => "DDIC",
            Ddpt => "DDPT",
            Dddc => "DDDC",
            Ddci => "DDCI",
            Ddco => "DDCO",
            Dcdt => "DCDT",
            Ddcb => "DDCB",
            Cmas => "CMAS",
            Cmai => "CMAI",
            Cmad => "CMAD",
            Dcbm => "DCBM",
            Dcbi => "DCBI",
            Dvst => "DVST",
        }
    }
}

impl std::fmt::Display for FrameTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a raw tag as ASCII when printable, hex otherwise.
pub fn fmt_tag(id: &[u8; 4]) -> String {
    if id.iter().all(|&c| c.is_ascii_graphic()) {
        String::from_utf8_lossy(id).into_owned()
    } else {
        format!("0x{}", hex::encode(id))
    }
}

/// Borrowed view of one frame inside a larger buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameView<'a> {
    pub id: [u8; 4],
    /// Offset of the frame header within the buffer it was read from.
    pub offset: usize,
    pub payload: &'a [u8],
}

impl<'a> FrameView<'a> {
    #[inline]
    pub fn tag(&self) -> Option<FrameTag> {
        FrameTag::from_bytes(self.id)
    }

    #[inline]
    pub fn is(&self, tag: FrameTag) -> bool {
        self.id == tag.bytes()
    }

    /// Total bytes occupied on the wire (header + payload).
    #[inline]
    pub fn wire_len(&self) -> usize {
        crate::constants::FRAME_HEADER_LEN + self.payload.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("truncated frame header at offset {offset}: {remaining} bytes remain")]
    TruncatedHeader { offset: usize, remaining: usize },

    #[error("truncated {} payload at offset {offset}: declared {declared}, available {available}", fmt_tag(.id))]
    TruncatedPayload {
        id: [u8; 4],
        offset: usize,
        declared: u32,
        available: usize,
    },

    #[error("truncated read at offset {offset}: need {need}, have {have}")]
    Truncated { offset: usize, need: usize, have: usize },

    #[error("expected {expected} frame, found {}", fmt_tag(.found))]
    UnexpectedTag { expected: FrameTag, found: [u8; 4] },

    #[error("{tag} frame not found")]
    Missing { tag: FrameTag },

    #[error("wide string length {chars} exceeds limit {max}")]
    StringTooLong { chars: u32, max: u32 },

    #[error("invalid {field} value {value}")]
    InvalidValue { field: &'static str, value: u32 },

    #[error("payload of {len} bytes does not fit a u32 length field")]
    PayloadTooLarge { len: usize },
}
