use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("file is not UTF-8 text: {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("no <Entry Name=\"{0}\"> element")]
    MissingEntry(&'static str),

    #[error("controller entry has no Value attribute")]
    MissingValue,

    #[error("controller entry has Type={0:?}, expected \"3\"")]
    UnexpectedType(String),

    #[error("invalid Base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
