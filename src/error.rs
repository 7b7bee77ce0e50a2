use axum::{extract::rejection::JsonRejection, http::StatusCode};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to clients when no provider key is configured.
pub const MISSING_API_KEY: &str = "API key is not configured";
/// Message returned to clients for transport and internal failures.
pub const PROCESSING_FAILED: &str = "Failed to process request";
/// Fallback when the provider rejects a request without an error message.
pub const GENERATION_FAILED: &str = "Failed to generate response";
/// Message returned when a submitted question is blank.
pub const EMPTY_QUESTION: &str = "Please enter a question";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing provider credential")]
    MissingApiKey,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Invalid request body: {0}")]
    Request(#[from] JsonRejection),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// HTTP status the relay answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Request(rejection) => rejection.status(),
            Self::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to put in the `{"error": ...}` envelope.
    ///
    /// Transport, request-body and ambient failures collapse to a generic message so that
    /// nothing about the provider URL (which carries the key) leaks out.
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingApiKey => MISSING_API_KEY.to_string(),
            Self::Config(msg) => msg.clone(),
            Self::Validation(msg) => msg.clone(),
            Self::Provider { message, .. } => message.clone(),
            _ => PROCESSING_FAILED.to_string(),
        }
    }
}
