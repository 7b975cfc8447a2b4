use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::constants::envelope::{
    CONTROLLER_ENTRY_NAME, CONTROLLER_ENTRY_TYPE, ENTRY_ELEMENT, ROOT_ELEMENT, SETTINGS_ELEMENT, XML_DECLARATION,
};

/// Wrap a binary payload in the XML document Traktor expects.
pub fn wrap_payload(payload: &[u8]) -> Vec<u8> {
    let value = STANDARD.encode(payload);
    format!(
        "{XML_DECLARATION}\n<{ROOT_ELEMENT}><{SETTINGS_ELEMENT}><{ENTRY_ELEMENT} Name=\"{CONTROLLER_ENTRY_NAME}\" Type=\"{CONTROLLER_ENTRY_TYPE}\" Value=\"{value}\"/></{SETTINGS_ELEMENT}></{ROOT_ELEMENT}>\n"
    )
    .into_bytes()
}
