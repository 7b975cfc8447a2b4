//! wstring.rs
//! Length-prefixed UTF-16BE text.
//!
//! Layout: `[ char count: u32 BE ][ count x u16 BE ]`.
//! The count is in UTF-16 code units. Valid surrogate pairs are joined,
//! lone surrogates decode to U+FFFD.

use crate::constants::MAX_WSTRING_CHARS;
use crate::framing::{ByteReader, FrameError, FrameWriter};

/// Read a wide string at `offset` with the default length ceiling.
pub fn read_wstring(buf: &[u8], offset: usize) -> Result<(String, usize), FrameError> {
    let mut r = ByteReader::at(buf, offset);
    let text = read_wstring_from(&mut r, MAX_WSTRING_CHARS)?;
    Ok((text, r.position()))
}

/// Read a wide string from a cursor, rejecting counts `>= max_chars`.
pub fn read_wstring_from(r: &mut ByteReader<'_>, max_chars: u32) -> Result<String, FrameError> {
    let chars = r.read_u32()?;
    if chars >= max_chars {
        return Err(FrameError::StringTooLong { chars, max: max_chars });
    }
    let byte_len = (chars as usize)
        .checked_mul(2)
        .ok_or(FrameError::StringTooLong { chars, max: max_chars })?;
    let raw = r.read_bytes(byte_len)?;
    Ok(decode_utf16be(raw))
}

/// Decode raw UTF-16BE bytes (even length) into a `String`.
pub fn decode_utf16be(raw: &[u8]) -> String {
    let units = raw.chunks_exact(2).map(|u| u16::from_be_bytes([u[0], u[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

/// Encode a wide string; the count is re-derived from the text.
pub fn write_wstring(text: &str) -> Vec<u8> {
    let mut w = FrameWriter::new();
    put_wstring(&mut w, text);
    w.into_bytes()
}

/// Number of UTF-16 code units `text` occupies on the wire.
#[inline]
pub fn wstring_units(text: &str) -> usize {
    text.encode_utf16().count()
}

pub fn put_wstring(w: &mut FrameWriter, text: &str) {
    w.put_u32(wstring_units(text) as u32);
    for unit in text.encode_utf16() {
        w.put_u16(unit);
    }
}
