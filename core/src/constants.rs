//! constants.rs
//! Wire constants for the TSI controller-mapping format.
//!
//! - Frame tags are stored as big-endian `u32` so they can back a
//!   `TryFromPrimitive` enum; `tags::bytes` gives the 4 ASCII bytes.
//! - Limits are the defaults for `CodecOptions`.

/// Format version written into DIOI on encode.
pub const FORMAT_VERSION: u32 = 1;

/// Frame header: 4-byte tag + 4-byte big-endian length.
pub const FRAME_HEADER_LEN: usize = 8;

/// Wide strings longer than this are treated as corruption.
pub const MAX_WSTRING_CHARS: u32 = 10_000;

/// Ceiling for a DCBI binding chunk payload.
pub const MAX_BINDING_CHUNK_LEN: u32 = 500;

/// Comment lengths at or above this are treated as "no comment".
pub const MAX_COMMENT_CHARS: u32 = 1_000;

/// Leading CMAD field, constant in every observed file.
pub const CMAD_MARKER: u32 = 4;

/// Fixed CMAD prefix up to and including the comment length field.
pub const CMAD_PREFIX_LEN: usize = 52;

/// Two modifier conditions, id + value each.
pub const CMAD_MODIFIERS_LEN: usize = 16;

/// Optional output tail: UI type, LED min/max, MIDI range min/max, invert, blend.
pub const CMAD_OUTPUT_TAIL_LEN: usize = 28;

/// CMAI header trio: binding id, direction, command id.
pub const CMAI_HEADER_LEN: usize = 12;

/// Sentinel command id for an intentionally unassigned slot.
pub const UNASSIGNED_COMMAND_ID: u32 = 0;

/// Envelope constants.
pub mod envelope {
    pub const XML_DECLARATION: &str =
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>"#;
    pub const ROOT_ELEMENT: &str = "NIXML";
    pub const SETTINGS_ELEMENT: &str = "TraktorSettings";
    pub const ENTRY_ELEMENT: &str = "Entry";
    pub const CONTROLLER_ENTRY_NAME: &str = "DeviceIO.Config.Controller";
    pub const CONTROLLER_ENTRY_TYPE: &str = "3";
}

/// Frame tag identifiers (ASCII, big-endian).
pub mod tags {
    pub const DIOM: u32 = 0x4449_4F4D;
    pub const DIOI: u32 = 0x4449_4F49;
    pub const DEVS: u32 = 0x4445_5653;
    pub const DEVI: u32 = 0x4445_5649;
    pub const DDAT: u32 = 0x4444_4154;
    pub const DDIF: u32 = 0x4444_4946;
    pub const DDIV: u32 = 0x4444_4956;
    pub const DDIC: u32 = 0x4444_4943;
    pub const DDPT: u32 = 0x4444_5054;
    pub const DDDC: u32 = 0x4444_4443;
    pub const DDCI: u32 = 0x4444_4349;
    pub const DDCO: u32 = 0x4444_434F;
    pub const DCDT: u32 = 0x4443_4454;
    pub const DDCB: u32 = 0x4444_4342;
    pub const CMAS: u32 = 0x434D_4153;
    pub const CMAI: u32 = 0x434D_4149;
    pub const CMAD: u32 = 0x434D_4144;
    pub const DCBM: u32 = 0x4443_424D;
    pub const DCBI: u32 = 0x4443_4249;
    pub const DVST: u32 = 0x4456_5354;

    #[inline]
    pub const fn bytes(tag: u32) -> [u8; 4] {
        tag.to_be_bytes()
    }
}

/// Wire values for controller types.
pub mod controller_ids {
    pub const BUTTON: u32 = 0;
    pub const FADER_OR_KNOB: u32 = 1;
    pub const ENCODER: u32 = 2;
    pub const LED: u32 = 0xFFFF;
}

/// Wire values for interaction modes.
pub mod interaction_ids {
    pub const TOGGLE: u32 = 1;
    pub const HOLD: u32 = 2;
    pub const DIRECT: u32 = 3;
    pub const RELATIVE: u32 = 4;
    pub const INCREMENT: u32 = 5;
    pub const DECREMENT: u32 = 6;
    pub const RESET: u32 = 7;
    pub const OUTPUT: u32 = 8;
    pub const TRIGGER: u32 = 9;
}

/// Wire values for target assignment (signed).
pub mod target_ids {
    pub const DEVICE_DEFAULT: i32 = -1;
    pub const GLOBAL: i32 = 0;
    pub const DECK_A: i32 = 1;
    pub const DECK_B: i32 = 2;
    pub const DECK_C: i32 = 3;
    pub const DECK_D: i32 = 4;
    pub const FX_UNIT_1: i32 = 5;
    pub const FX_UNIT_2: i32 = 6;
    pub const FX_UNIT_3: i32 = 7;
    pub const FX_UNIT_4: i32 = 8;
}
