//! tsi-core
//!
//! Codec for Traktor controller-mapping (`.tsi`) files.
//! Pure library: bytes in, model out, and back. No I/O.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;
pub mod catalog;
pub mod telemetry;

// Wire layers, leaves first
pub mod envelope;
pub mod framing;
pub mod wstring;
pub mod midi;
pub mod binding;
pub mod mapping;
pub mod device;
pub mod file;

// Model and entry points
pub mod model;
pub mod codec;
pub mod batch;

pub use codec::TsiCodec;
pub use config::CodecOptions;
pub use model::{Device, MappingEntry, MappingFile};
pub use telemetry::DecodeReport;
pub use types::TsiError;

/// Decode a `.tsi` document with default options and placeholder command names.
pub fn decode_file(bytes: &[u8]) -> Result<MappingFile, TsiError> {
    TsiCodec::default().decode_file(bytes)
}

/// Encode a model into a `.tsi` document with placeholder command names.
pub fn encode_file(model: &MappingFile) -> Result<Vec<u8>, TsiError> {
    TsiCodec::default().encode_file(model)
}

pub fn decode_payload(payload: &[u8]) -> Result<MappingFile, TsiError> {
    TsiCodec::default().decode_payload(payload)
}

pub fn encode_payload(model: &MappingFile) -> Result<Vec<u8>, TsiError> {
    TsiCodec::default().encode_payload(model)
}

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::catalog::{CommandCatalog, CommandTable, PlaceholderCatalog};
    pub use crate::midi::MidiControl;
    pub use crate::model::*;
    pub use crate::{CodecOptions, DecodeReport, TsiCodec, TsiError};
}
