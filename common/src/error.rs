//! Error types

use thiserror::Error;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message shown to the user in a notification.
    ///
    /// Validation and server messages are already user-facing; everything
    /// else collapses to `fallback` so transport details stay in the console.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(msg) | Error::Server(msg) => msg.clone(),
            Error::TemplateNotFound(name) => format!("Mall \"{}\" hittades inte.", name),
            _ => fallback.to_string(),
        }
    }
}
