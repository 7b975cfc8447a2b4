//! mapping/mod.rs
//! One mapping item: `CMAI` header trio plus its `CMAD` settings block.
//!
//! ```text
//! CMAI: [ binding_id u32 ][ direction u32 ][ command_id u32 ][ CMAD frame ]
//! CMAD: [ marker ][ controller ][ interaction ][ target i32 ][ auto_repeat ]
//!       [ invert ][ soft_takeover ][ sensitivity f32 ][ acceleration f32 ]
//!       [ reserved x8 ][ set_to f32 ][ comment_len ]            -- 52 bytes
//!       [ comment UTF-16BE ]                                   -- optional
//!       [ mod1 id ][ mod1 value ][ mod2 id ][ mod2 value ]
//!       [ ui_type ][ led_min f32 ][ led_max f32 ][ midi_min ][ midi_max ]
//!       [ led_invert ][ led_blend ]                            -- optional tail
//! ```

pub mod decode;
pub mod encode;

pub use decode::{decode_mapping, decode_settings, DecodedMapping, MappingContext, Settings};
pub use encode::encode_mapping;
