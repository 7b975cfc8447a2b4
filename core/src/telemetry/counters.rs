//! telemetry/counters.rs
//! Counters collected while decoding one payload.
use std::ops::AddAssign;

use serde::Serialize;

use crate::framing::fmt_tag;

/// What a decode pass kept, skipped and could not resolve.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub devices: u64,
    pub mappings: u64,
    /// CMAI records with command id 0.
    pub skipped_unassigned: u64,
    /// Records dropped because they were truncated or corrupt.
    pub skipped_malformed: u64,
    /// Devices dropped because they were truncated or corrupt.
    pub skipped_devices: u64,
    /// Mappings whose binding id had no descriptor.
    pub unresolved_bindings: u64,
    pub bindings_primary: u64,
    pub bindings_fallback: u64,
    /// Frame tags seen inside devices that the codec does not model:
    /// foreign tags plus DDIF, DDIV and DVST.
    pub unknown_frames: Vec<[u8; 4]>,
}

impl DecodeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unmodelled frame tag once.
    pub fn add_unknown_frame(&mut self, id: [u8; 4]) {
        if !self.unknown_frames.contains(&id) {
            self.unknown_frames.push(id);
        }
    }

    /// True when nothing was skipped, unresolved or unknown.
    pub fn is_clean(&self) -> bool {
        self.skipped_malformed == 0
            && self.skipped_devices == 0
            && self.unresolved_bindings == 0
            && self.unknown_frames.is_empty()
    }

    pub fn unknown_frame_names(&self) -> Vec<String> {
        self.unknown_frames.iter().map(fmt_tag).collect()
    }

    pub fn merge(&mut self, other: &DecodeReport) {
        self.devices += other.devices;
        self.mappings += other.mappings;
        self.skipped_unassigned += other.skipped_unassigned;
        self.skipped_malformed += other.skipped_malformed;
        self.skipped_devices += other.skipped_devices;
        self.unresolved_bindings += other.unresolved_bindings;
        self.bindings_primary += other.bindings_primary;
        self.bindings_fallback += other.bindings_fallback;
        for id in &other.unknown_frames {
            self.add_unknown_frame(*id);
        }
    }
}

impl AddAssign for DecodeReport {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
