//! file/mod.rs
//! Root of the binary payload.
//!
//! ```text
//! DIOM: [ DIOI version u32 ][ DEVS [ count u32 ][ DEVI* ] ]
//! ```

pub mod decode;
pub mod encode;

pub use decode::decode_payload;
pub use encode::encode_payload;
