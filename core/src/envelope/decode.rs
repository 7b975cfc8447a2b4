use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::envelope::{CONTROLLER_ENTRY_NAME, CONTROLLER_ENTRY_TYPE, ENTRY_ELEMENT};
use crate::envelope::types::EnvelopeError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extract the binary payload from a `.tsi` document.
///
/// Whitespace inside the Base64 value is ignored; some editors wrap it.
pub fn unwrap_payload(file: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
    let file = file.strip_prefix(UTF8_BOM).unwrap_or(file);
    let text = std::str::from_utf8(file)?;
    let doc = roxmltree::Document::parse(text)?;

    let entry = doc
        .descendants()
        .find(|n| n.has_tag_name(ENTRY_ELEMENT) && n.attribute("Name") == Some(CONTROLLER_ENTRY_NAME))
        .ok_or(EnvelopeError::MissingEntry(CONTROLLER_ENTRY_NAME))?;

    if let Some(ty) = entry.attribute("Type") {
        if ty != CONTROLLER_ENTRY_TYPE {
            return Err(EnvelopeError::UnexpectedType(ty.to_string()));
        }
    }

    let value = entry.attribute("Value").ok_or(EnvelopeError::MissingValue)?;
    let compact: String = value.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}
