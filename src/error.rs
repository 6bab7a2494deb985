//! Error type shared by every stage of the news pipeline.
//!
//! Fetch failures are deliberately flattened into a single variant: callers
//! never branch on transport errors versus HTTP status codes, they only need
//! to know the request did not produce a usable body.

use thiserror::Error;

/// Everything that can go wrong while building, fetching, parsing or
/// writing news results.
#[derive(Debug, Error)]
pub enum NewsError {
    /// Network error, timeout, or non-2xx status.
    #[error("request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The HTTP client itself could not be constructed (TLS backend, bad
    /// builder settings). No request was attempted.
    #[error("could not build HTTP client: {0}")]
    Client(String),

    /// The body arrived but could not be understood.
    #[error("malformed response: {0}")]
    Parse(String),

    #[error("Alpha Vantage API key is required via --apikey or ALPHA_VANTAGE_API_KEY env var")]
    MissingApiKey,

    #[error("no tickers provided")]
    NoTickers,

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NewsError {
    /// Process exit code for this failure.
    ///
    /// Fetch, parse and configuration problems map to `2`; anything else
    /// (file system, serialization) maps to `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            NewsError::Fetch { .. }
            | NewsError::Client(_)
            | NewsError::Parse(_)
            | NewsError::MissingApiKey
            | NewsError::NoTickers => 2,
            NewsError::Url(_) | NewsError::Io(_) | NewsError::Json(_) => 1,
        }
    }
}
