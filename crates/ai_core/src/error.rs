//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the inference API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the inference API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Request exceeded the configured timeout
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Non-success status from the API
    #[error("Server error: {0}")]
    ServerError(String),

    /// Response parsing failed or carried no completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Engine could not be built from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Classify a transport error, reporting the configured timeout
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_display_includes_duration() {
        let err = InferenceError::Timeout(30_000);
        assert_eq!(err.to_string(), "Inference timeout after 30000ms");
    }

    #[test]
    fn server_error_display() {
        let err = InferenceError::ServerError("Status 500: boom".to_string());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn invalid_response_display() {
        let err = InferenceError::InvalidResponse("no choices".to_string());
        assert_eq!(err.to_string(), "Invalid response: no choices");
    }
}
