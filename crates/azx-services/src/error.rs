//! Error types for azx-services

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{service} request failed with HTTP {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{service} response carried no operation-location header")]
    MissingOperationLocation { service: &'static str },

    #[error("Document analysis failed: {body}")]
    AnalyzeFailed { body: String },

    #[error("Analyze operation still running after {attempts} polls")]
    PollTimeout { attempts: u32 },

    #[error("Chat completion returned no choices")]
    EmptyChoices,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
