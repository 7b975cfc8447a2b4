//! framing/mod.rs
//! Chunk framing for the TSI binary payload.
//!
//! Responsibilities:
//! - Frame tags and borrowed frame views
//! - Bounds-checked reads of frames and primitives (big-endian)
//! - Frame writing with deferred length patching
//! - Ordered child lookup with a byte-wise scan fallback
//!
//! Non-responsibilities:
//! - Envelope (XML / Base64)
//! - Semantic meaning of any payload

pub mod types;
pub mod decode;
pub mod encode;
pub mod scan;

pub use types::{fmt_tag, FrameError, FrameTag, FrameView};
pub use decode::{read_frame, ByteReader, FrameIter};
pub use encode::{write_frame, FrameWriter};
pub use scan::{find_child, find_frame, find_frame_from, scan_frames};
