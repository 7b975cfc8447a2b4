//! config.rs
//! Codec limits and behaviour switches.
//!
//! Defaults come from `constants`; callers may load overrides from JSON.
//! Missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_BINDING_CHUNK_LEN, MAX_COMMENT_CHARS, MAX_WSTRING_CHARS};
use crate::types::TsiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Wide strings with this many units or more are rejected.
    pub max_wstring_chars: u32,
    /// DCBI chunks with a larger payload are rejected.
    pub max_binding_chunk_len: u32,
    /// CMAD comment lengths at or above this mean "no comment".
    pub max_comment_chars: u32,
    /// Turn locally recoverable defects into errors.
    pub strict: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_wstring_chars: MAX_WSTRING_CHARS,
            max_binding_chunk_len: MAX_BINDING_CHUNK_LEN,
            max_comment_chars: MAX_COMMENT_CHARS,
            strict: false,
        }
    }
}

impl CodecOptions {
    pub fn strict() -> Self {
        Self { strict: true, ..Default::default() }
    }

    pub fn from_json(text: &str) -> Result<Self, TsiError> {
        Ok(serde_json::from_str(text)?)
    }
}
