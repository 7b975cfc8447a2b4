use thiserror::Error;

use crate::envelope::EnvelopeError;
use crate::framing::FrameError;
use crate::model::ModelError;

/// Unified codec error covering envelope, framing, model and config failures.
/// - `From<T>` impls enable `?` across layers.
/// - Fatal decode errors name the region that failed.
#[derive(Debug, Error)]
pub enum TsiError {
    /// XML / Base64 wrapper could not be read.
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Frame-level error outside any region context.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A structural region could not be decoded.
    #[error("{region}: {source}")]
    Region {
        region: &'static str,
        #[source]
        source: FrameError,
    },

    /// A local defect that strict mode refuses to skip.
    #[error("strict decode: {region}: {detail}")]
    Strict { region: &'static str, detail: String },

    /// Model rejected before encoding.
    #[error("device {device}{}: {source}", fmt_mapping(.mapping))]
    InvalidModel {
        device: usize,
        mapping: Option<usize>,
        #[source]
        source: ModelError,
    },

    /// Options or command catalog could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A batch worker thread panicked.
    #[error("worker error: {0}")]
    Worker(String),
}

impl TsiError {
    /// Attach a region name to a frame error.
    pub fn region(region: &'static str) -> impl FnOnce(FrameError) -> TsiError {
        move |source| TsiError::Region { region, source }
    }
}

fn fmt_mapping(mapping: &Option<usize>) -> String {
    match mapping {
        Some(m) => format!(" mapping {m}"),
        None => String::new(),
    }
}
