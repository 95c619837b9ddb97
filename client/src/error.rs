//! Error handling for the AgriManage client

use serde::Deserialize;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Backend errors
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },

    // Authentication errors
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Local errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Token storage error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of a backend rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build an API error from a non-success response body
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        if status == 401 || status == 403 {
            return ClientError::NotAuthenticated;
        }
        ClientError::Api {
            status,
            message: detail_message(body),
        }
    }
}

impl From<&'static str> for ClientError {
    fn from(message: &'static str) -> Self {
        ClientError::Validation(message.to_string())
    }
}

/// FastAPI-style error body
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn detail_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.is_empty() => "no response body".to_string(),
        Err(_) => body.to_string(),
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
