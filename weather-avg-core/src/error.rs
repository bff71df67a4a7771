use thiserror::Error;

use crate::model::Quantity;

/// Error produced by an HTTP transport before any response arrived.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum AverageError {
    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("Archive request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected archive response shape")]
    Malformed(#[source] serde_json::Error),

    #[error("No {0} samples recorded for the requested day")]
    InsufficientData(Quantity),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String, #[source] chrono::ParseError),
}

impl AverageError {
    /// True when the upstream answered but had nothing usable for the day.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AverageError::InsufficientData(_))
    }
}
