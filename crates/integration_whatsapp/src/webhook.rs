//! WhatsApp webhook model
//!
//! Inbound webhook payloads and the subscription verification handshake.
//!
//! Every nesting level of the payload is optional: delivery-status callbacks
//! carry no `messages`, and some test deliveries omit `entry` entirely. An
//! absent level is modelled as `None`. The body itself must be a JSON object.

use serde::{Deserialize, de::Error as _};
use thiserror::Error;
use tracing::warn;

/// The only `hub.mode` accepted during verification
pub const SUBSCRIBE_MODE: &str = "subscribe";

/// Webhook verification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Mode was not `subscribe` or the verify token did not match
    #[error("Verification failed")]
    Forbidden,

    /// Credentials matched but the challenge is not an integer
    #[error("Invalid hub.challenge: {0}")]
    InvalidChallenge(String),
}

/// Check a verification request and return the challenge to echo back.
///
/// The platform expects the challenge as a number, so it is parsed here. The
/// credential check runs first: a mismatch is always `Forbidden`, whatever
/// the challenge looks like.
pub fn verify_subscription(
    mode: &str,
    verify_token: &str,
    challenge: &str,
    expected_token: &str,
) -> Result<i64, VerificationError> {
    if mode != SUBSCRIBE_MODE || verify_token != expected_token {
        warn!(mode = %mode, "Webhook verification failed");
        return Err(VerificationError::Forbidden);
    }

    challenge.trim().parse::<i64>().map_err(|_| {
        warn!(challenge = %challenge, "Webhook challenge is not numeric");
        VerificationError::InvalidChallenge(challenge.to_string())
    })
}

/// WhatsApp webhook payload
///
/// Only the fields dispatch reads are modelled; metadata such as ids,
/// timestamps and delivery statuses is ignored whatever its shape.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub entry: Option<Vec<WebhookEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Option<Vec<WebhookChange>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub value: Option<WebhookValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messages: Option<Vec<WebhookMessage>>,
}

/// A single inbound message; `from` is the only required field
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    pub from: String,
    #[serde(default)]
    pub text: Option<TextMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextMessage {
    #[serde(default)]
    pub body: Option<String>,
}

impl WebhookPayload {
    /// Parse a raw webhook body
    ///
    /// Anything other than a JSON object is rejected, including arrays that
    /// serde would otherwise accept as a field sequence.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(
                "webhook payload must be a JSON object",
            ));
        }
        serde_json::from_value(value)
    }

    /// First message of the first change of the first entry.
    ///
    /// Further entries, changes and messages are ignored.
    pub fn first_message(&self) -> Option<&WebhookMessage> {
        self.entry
            .as_deref()?
            .first()?
            .changes
            .as_deref()?
            .first()?
            .value
            .as_ref()?
            .messages
            .as_deref()?
            .first()
    }
}

impl WebhookMessage {
    /// Text body, or an empty string for non-text messages
    pub fn body(&self) -> &str {
        self.text
            .as_ref()
            .and_then(|t| t.body.as_deref())
            .unwrap_or_default()
    }
}
