//! Tag lookups inside a region.
//!
//! `find_child` walks sibling frames in order and only drops to the
//! byte-wise scan when that walk breaks. Sibling frames inside a device
//! region are not always contiguous, so the scan moves one byte at a time
//! and only trusts a hit whose declared length fits the region.

use crate::framing::decode::{read_frame, FrameIter};
use crate::framing::types::{FrameTag, FrameView};

/// First `tag` child among the frames starting at `start`.
///
/// User text inside an earlier sibling can spell any tag, so the byte scan
/// is only the fallback for a child list that does not parse end to end.
pub fn find_child(container: &[u8], start: usize, tag: FrameTag) -> Option<FrameView<'_>> {
    let mut children = FrameIter::at(container, start);
    if let Some(frame) = children.by_ref().find(|f| f.is(tag)) {
        return Some(frame);
    }
    children.stopped.and_then(|_| find_frame_from(container, start, tag))
}

/// First validated `tag` frame in `region`.
#[inline]
pub fn find_frame(region: &[u8], tag: FrameTag) -> Option<FrameView<'_>> {
    find_frame_from(region, 0, tag)
}

/// First validated `tag` frame at or after `start`.
pub fn find_frame_from(region: &[u8], start: usize, tag: FrameTag) -> Option<FrameView<'_>> {
    let needle = tag.bytes();
    let mut pos = start;
    while pos + 4 <= region.len() {
        if region[pos..pos + 4] == needle {
            if let Ok((frame, _)) = read_frame(region, pos) {
                return Some(frame);
            }
        }
        pos += 1;
    }
    None
}

/// Every validated, non-overlapping `tag` frame in `region`, in order.
pub fn scan_frames(region: &[u8], tag: FrameTag) -> ScanFrames<'_> {
    ScanFrames { region, pos: 0, tag }
}

#[derive(Debug, Clone)]
pub struct ScanFrames<'a> {
    region: &'a [u8],
    pos: usize,
    tag: FrameTag,
}

impl<'a> Iterator for ScanFrames<'a> {
    type Item = FrameView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = find_frame_from(self.region, self.pos, self.tag)?;
        self.pos = frame.offset + frame.wire_len();
        Some(frame)
    }
}
