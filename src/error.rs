// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection, TLS, timeout, or body read failure.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("{what} not found in {context}")]
    MissingElement { what: &'static str, context: String },

    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("response from {url} is not a recognised image")]
    NotAnImage { url: String },

    #[error("bad selector {0}")]
    Selector(String),

    #[error("could not read config {path}: {message}")]
    ConfigFile { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] ::csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Worth another attempt: the server or the network may recover.
    pub fn is_transient(&self) -> bool {
        match self {
            ScrapeError::Transport { .. } => true,
            ScrapeError::Status { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let t = ScrapeError::Transport { url: s!("u"), message: s!("timed out") };
        assert!(t.is_transient());

        let busy = ScrapeError::Status { url: s!("u"), status: 503 };
        assert!(busy.is_transient());

        let limited = ScrapeError::Status { url: s!("u"), status: 429 };
        assert!(limited.is_transient());

        let gone = ScrapeError::Status { url: s!("u"), status: 404 };
        assert!(!gone.is_transient());

        let missing = ScrapeError::MissingElement { what: "h1", context: s!("spot 1") };
        assert!(!missing.is_transient());
    }
}
