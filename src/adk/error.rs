// SPDX-License-Identifier: MIT

//! Typed error handling for backlot-rs.

use thiserror::Error;

/// Top-level error type for the agent runtime.
#[derive(Debug, Error)]
pub enum AdkError {
    /// API errors from external services (Gemini, Wikipedia, Yahoo, etc.)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Instruction template errors (missing required state key)
    #[error("Template error: {0}")]
    Template(String),

    /// Tool rejected its arguments or failed in a way it reports itself
    #[error("Tool error: {0}")]
    Tool(String),

    /// Agent reached its turn or iteration limit without an answer
    #[error("Max {kind} reached: {limit}")]
    MaxTurns { kind: String, limit: u32 },

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// URL construction errors
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// Generic error wrapper for compatibility
    #[error("{0}")]
    Other(String),
}

impl AdkError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a tool error
    pub fn tool(message: impl Into<String>) -> Self {
        Self::Tool(message.into())
    }

    /// Create from a generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<&str> for AdkError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for AdkError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}
