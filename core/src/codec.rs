//! codec.rs
//! Entry points tying envelope, payload and model together.
//!
//! A `TsiCodec` holds only read-only configuration; each call builds and
//! drops its own working tables, so one codec can serve many threads.

use crate::catalog::{CommandCatalog, PlaceholderCatalog};
use crate::config::CodecOptions;
use crate::envelope::{unwrap_payload, wrap_payload};
use crate::file;
use crate::model::MappingFile;
use crate::telemetry::DecodeReport;
use crate::types::TsiError;

static PLACEHOLDER_CATALOG: PlaceholderCatalog = PlaceholderCatalog;

#[derive(Clone)]
pub struct TsiCodec<'c> {
    opts: CodecOptions,
    catalog: &'c dyn CommandCatalog,
}

impl Default for TsiCodec<'static> {
    fn default() -> Self {
        Self { opts: CodecOptions::default(), catalog: &PLACEHOLDER_CATALOG }
    }
}

impl<'c> TsiCodec<'c> {
    pub fn new(opts: CodecOptions, catalog: &'c dyn CommandCatalog) -> Self {
        Self { opts, catalog }
    }

    pub fn with_catalog<'n>(self, catalog: &'n dyn CommandCatalog) -> TsiCodec<'n> {
        TsiCodec { opts: self.opts, catalog }
    }

    pub fn with_options(self, opts: CodecOptions) -> Self {
        Self { opts, ..self }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.opts
    }

    /// `.tsi` document bytes -> model.
    pub fn decode_file(&self, bytes: &[u8]) -> Result<MappingFile, TsiError> {
        self.decode_file_with_report(bytes).map(|(file, _)| file)
    }

    pub fn decode_file_with_report(&self, bytes: &[u8]) -> Result<(MappingFile, DecodeReport), TsiError> {
        let payload = unwrap_payload(bytes)?;
        self.decode_payload_with_report(&payload)
    }

    /// Binary payload -> model.
    pub fn decode_payload(&self, payload: &[u8]) -> Result<MappingFile, TsiError> {
        self.decode_payload_with_report(payload).map(|(file, _)| file)
    }

    pub fn decode_payload_with_report(&self, payload: &[u8]) -> Result<(MappingFile, DecodeReport), TsiError> {
        file::decode_payload(payload, self.catalog, &self.opts)
    }

    /// Model -> `.tsi` document bytes.
    pub fn encode_file(&self, model: &MappingFile) -> Result<Vec<u8>, TsiError> {
        Ok(wrap_payload(&self.encode_payload(model)?))
    }

    /// Model -> binary payload.
    pub fn encode_payload(&self, model: &MappingFile) -> Result<Vec<u8>, TsiError> {
        file::encode_payload(model, self.catalog, &self.opts)
    }
}
