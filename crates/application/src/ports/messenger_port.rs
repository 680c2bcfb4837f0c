//! Messenger port - Outbound interface to the messaging platform
//!
//! Abstracts sending plain-text replies so the webhook use case does not
//! depend on a concrete platform client.

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// An incoming text message extracted from a webhook delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingTextMessage {
    /// Opaque sender identifier (the platform's `from` field)
    pub sender: String,
    /// Text content, empty for non-text messages
    pub text: String,
}

impl IncomingTextMessage {
    /// Create a new incoming message
    #[must_use]
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// An outgoing plain-text reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTextMessage {
    /// Recipient identifier
    pub recipient: String,
    /// Text content
    pub text: String,
}

impl OutgoingTextMessage {
    /// Create a new outgoing text message
    #[must_use]
    pub fn new(recipient: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            text: text.into(),
        }
    }

    /// Create a reply addressed to the sender of an incoming message
    #[must_use]
    pub fn reply_to(incoming: &IncomingTextMessage, text: impl Into<String>) -> Self {
        Self::new(incoming.sender.clone(), text)
    }
}

/// Confirmation returned by the platform after a successful send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Platform message ID, when the platform returned one
    pub message_id: Option<String>,
}

/// Port for sending messages through the messaging platform
///
/// Failures are returned to the caller; nothing is retried or swallowed.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Send a plain-text message
    async fn send_text(
        &self,
        message: OutgoingTextMessage,
    ) -> Result<DeliveryReceipt, ApplicationError>;
}
