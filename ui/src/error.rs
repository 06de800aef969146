//! Error types for calls against the collections API

use serde_json::Value;
use thiserror::Error;

/// Shown when a failure carries no usable text at all.
pub const GENERIC_FAILURE: &str = "Unknown error";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS...)
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status { status: u16, message: Option<String> },

    /// A 2xx response whose body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error, picking up `message` (or `error`) from a JSON body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
                .filter(|m| !m.trim().is_empty())
        });
        ApiError::Status { status, message }
    }

    /// Text for the user: the server's message when it sent one, the
    /// transport-level description otherwise, and a generic fallback last.
    pub fn user_message(&self) -> String {
        if let ApiError::Status { message: Some(message), .. } = self {
            return message.clone();
        }
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            text
        }
    }
}
