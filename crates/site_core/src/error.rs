use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {status}")]
    Status { status: u16 },
    #[error("invalid response from server: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            TransportError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else {
            TransportError::Network(value.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access theme store '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("theme store '{path}' is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
