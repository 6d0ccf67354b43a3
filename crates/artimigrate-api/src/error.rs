use std::error::Error as StdError;

use thiserror::Error;

/// Errors raised at every repository boundary
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

impl MigrationError {
    /// Builds an `Api` error from a status code and a (possibly long) body
    pub fn api(status: u16, body: &str) -> Self {
        let message = if body.len() > 300 {
            let mut end = 300;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &body[..end])
        } else if body.is_empty() {
            "empty response body".to_string()
        } else {
            body.to_string()
        };
        MigrationError::Api { status, message }
    }
}

impl From<serde_json::Error> for MigrationError {
    fn from(err: serde_json::Error) -> Self {
        MigrationError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for MigrationError {
    fn from(err: reqwest::Error) -> Self {
        let message = describe_chain(&err);
        if err.is_decode() {
            MigrationError::Serialization(message)
        } else if err.is_builder() {
            MigrationError::Request(message)
        } else if let Some(status) = err.status() {
            MigrationError::Api {
                status: status.as_u16(),
                message,
            }
        } else {
            MigrationError::Network(message)
        }
    }
}

/// Renders an error followed by its `source()` chain, skipping causes whose
/// text the message already carries
fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        cause = inner.source();
    }
    message
}
