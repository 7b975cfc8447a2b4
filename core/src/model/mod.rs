//! model/mod.rs
//! In-memory semantic model of a controller-mapping file.
//!
//! The model is what collaborators edit; the codec builds it fresh on every
//! decode and reads it on every encode. Binding tables never appear here.

pub mod types;
pub mod entry;
pub mod device;
pub mod validate;

pub use types::*;
pub use entry::*;
pub use device::*;
pub use validate::ModelError;
