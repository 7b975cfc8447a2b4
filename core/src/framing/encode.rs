use byteorder::{BigEndian, ByteOrder};

use crate::constants::FRAME_HEADER_LEN;
use crate::framing::types::{FrameError, FrameTag};

/// Encode one frame: 4 tag bytes, big-endian length, payload. No padding.
pub fn write_frame(tag: FrameTag, payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let len = u32::try_from(payload.len())
        .map_err(|_| FrameError::PayloadTooLarge { len: payload.len() })?;

    let mut out = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    out.extend_from_slice(&tag.bytes());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}

/// Growable big-endian output buffer with nested frame support.
///
/// Nested frames reserve their length field and patch it once the body is
/// written, so payloads are never copied twice.
#[derive(Debug, Default, Clone)]
pub struct FrameWriter {
    buf: Vec<u8>,
}

impl FrameWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self { buf: Vec::with_capacity(cap) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn put_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    #[inline]
    pub fn put_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    #[inline]
    pub fn put_f32(&mut self, v: f32) {
        let mut raw = [0u8; 4];
        BigEndian::write_f32(&mut raw, v);
        self.buf.extend_from_slice(&raw);
    }

    #[inline]
    pub fn put_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    #[inline]
    pub fn put_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn put_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    /// Write `tag`, run `body` to produce the payload, then patch the length.
    pub fn frame<E, F>(&mut self, tag: FrameTag, body: F) -> Result<(), E>
    where
        E: From<FrameError>,
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        self.buf.extend_from_slice(&tag.bytes());
        let len_at = self.buf.len();
        self.buf.extend_from_slice(&[0u8; 4]);

        body(self)?;

        let payload_len = self.buf.len() - len_at - 4;
        let len = u32::try_from(payload_len)
            .map_err(|_| FrameError::PayloadTooLarge { len: payload_len })?;
        BigEndian::write_u32(&mut self.buf[len_at..len_at + 4], len);
        Ok(())
    }
}
