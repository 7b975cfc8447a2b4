//! device/mod.rs
//! One device: `DEVI` (name + `DDAT`).
//!
//! ```text
//! DEVI: [ name wstring ][ DDAT ]
//! DDAT: [ DDIC comment ][ DDPT in/out ports ]
//!       [ DDDC [ DDCI count DCDT* ][ DDCO count DCDT* ] ]
//!       [ DDCB [ CMAS count CMAI* ][ DCBM count DCBI* ] ]
//! ```
//!
//! Decoding locates each child by byte scan; encoding writes them in the
//! order above.

pub mod decode;
pub mod encode;

pub use decode::decode_device;
pub use encode::{encode_device, plan_device, DevicePlan};
