//! API error types and backend message extraction.

use thiserror::Error;

/// Errors surfaced by [`crate::api::client::PlatformClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status; the message is the
    /// best extraction from its structured error body.
    #[error("{0}")]
    Backend(String),

    /// The request never completed (connection, timeout, bad URL).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fallback when the error body carries nothing usable.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Extract a user-facing message from a backend error body.
///
/// Bodies carry either `errors: [{message}]`, a `message`, or an `error`
/// string; `errors[].message` entries are joined with commas, the scalar
/// keys are fallbacks, and anything unparseable yields the generic string.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(errors) = value.get("errors").and_then(|e| e.as_array()) {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|entry| entry.get("message").and_then(|m| m.as_str()))
                .collect();
            if !messages.is_empty() {
                return messages.join(", ");
            }
        }
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|m| m.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    GENERIC_ERROR.to_string()
}
