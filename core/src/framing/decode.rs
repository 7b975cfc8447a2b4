use byteorder::{BigEndian, ByteOrder};

use crate::constants::FRAME_HEADER_LEN;
use crate::framing::types::{FrameError, FrameTag, FrameView};

/// Read one frame at `offset`.
///
/// # Returns
/// - `Ok((frame, consumed))` where `consumed` is header + payload length.
/// - `Err(FrameError::TruncatedHeader)` when fewer than 8 bytes remain.
/// - `Err(FrameError::TruncatedPayload)` when the declared length overruns `buf`.
///
/// Never reads out of bounds; an adversarial length field only yields an error.
#[inline]
pub fn read_frame(buf: &[u8], offset: usize) -> Result<(FrameView<'_>, usize), FrameError> {
    let remaining = buf.len().saturating_sub(offset);
    if remaining < FRAME_HEADER_LEN {
        return Err(FrameError::TruncatedHeader { offset, remaining });
    }

    let mut id = [0u8; 4];
    id.copy_from_slice(&buf[offset..offset + 4]);
    let declared = BigEndian::read_u32(&buf[offset + 4..offset + 8]);

    let start = offset + FRAME_HEADER_LEN;
    let available = buf.len() - start;
    if declared as usize > available {
        return Err(FrameError::TruncatedPayload { id, offset, declared, available });
    }

    let end = start + declared as usize;
    let frame = FrameView { id, offset, payload: &buf[start..end] };
    Ok((frame, end - offset))
}

/// Forward-only, bounds-checked cursor over a big-endian byte region.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unread tail of the region.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos.min(self.buf.len())..]
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FrameError> {
        if self.remaining() < n {
            return Err(FrameError::Truncated { offset: self.pos, need: n, have: self.remaining() });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FrameError> {
        self.read_bytes(n).map(|_| ())
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, FrameError> {
        self.read_bytes(4).map(BigEndian::read_u32)
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, FrameError> {
        self.read_bytes(4).map(BigEndian::read_i32)
    }

    #[inline]
    pub fn read_f32(&mut self) -> Result<f32, FrameError> {
        self.read_bytes(4).map(BigEndian::read_f32)
    }

    pub fn read_u16(&mut self) -> Result<u16, FrameError> {
        self.read_bytes(2).map(BigEndian::read_u16)
    }

    /// Read the next frame and advance past it.
    pub fn read_frame(&mut self) -> Result<FrameView<'a>, FrameError> {
        let (frame, consumed) = read_frame(self.buf, self.pos)?;
        self.pos += consumed;
        Ok(frame)
    }

    /// Read the next frame and require a specific tag.
    pub fn expect_frame(&mut self, tag: FrameTag) -> Result<FrameView<'a>, FrameError> {
        let frame = self.read_frame()?;
        if !frame.is(tag) {
            return Err(FrameError::UnexpectedTag { expected: tag, found: frame.id });
        }
        Ok(frame)
    }
}

/// Sequential walk over contiguous sibling frames.
///
/// Stops at the first position that does not hold a complete frame; the
/// error (if any) is kept in `stopped` for diagnostics.
#[derive(Debug)]
pub struct FrameIter<'a> {
    buf: &'a [u8],
    pos: usize,
    pub stopped: Option<FrameError>,
}

impl<'a> FrameIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, stopped: None }
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos, stopped: None }
    }
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = FrameView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped.is_some() || self.pos >= self.buf.len() {
            return None;
        }
        match read_frame(self.buf, self.pos) {
            Ok((frame, consumed)) => {
                self.pos += consumed;
                Some(frame)
            }
            Err(e) => {
                self.stopped = Some(e);
                None
            }
        }
    }
}
