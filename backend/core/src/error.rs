use thiserror::Error;

/// Top-level error type for the inkmath runtime.
///
/// Parse failures are deliberately absent: a malformed model reply is
/// absorbed by the analysis layer and degrades to fallback records, so it
/// never crosses the service boundary as an error.
#[derive(Debug, Error)]
pub enum InkError {
    #[error("unauthorized")]
    Auth,

    #[error("image decode failed: {0}")]
    ImageDecode(String),

    #[error("model provider error ({provider}): {message}")]
    Upstream { provider: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
