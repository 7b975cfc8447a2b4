//! envelope/mod.rs
//! XML + Base64 wrapper around the binary payload.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="no" ?>
//! <NIXML><TraktorSettings><Entry Name="DeviceIO.Config.Controller" Type="3" Value="BASE64"/></TraktorSettings></NIXML>
//! ```

pub mod types;
pub mod encode;
pub mod decode;

pub use types::EnvelopeError;
pub use encode::wrap_payload;
pub use decode::unwrap_payload;
