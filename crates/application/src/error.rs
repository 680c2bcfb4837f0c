//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Sending a reply through the messaging platform failed
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}
