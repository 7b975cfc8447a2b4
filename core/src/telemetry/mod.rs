//! telemetry/mod.rs
//! Per-call decode counters.
//!
//! - Every local skip is counted here so callers can surface it.
//! - Reports are plain values; batch runs merge them without locks.

pub mod counters;

pub use counters::*;
