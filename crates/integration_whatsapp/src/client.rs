//! WhatsApp client for sending messages
//!
//! Uses the Meta Graph API (`/{version}/{phone_number_id}/messages`) to send
//! plain-text WhatsApp messages.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),
}

/// WhatsApp client configuration
#[derive(Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID of the sending WhatsApp Business number
    pub phone_number_id: String,
    /// Graph API base URL (default: https://graph.facebook.com)
    pub api_base_url: String,
    /// API version (default: v15.0)
    pub api_version: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            api_base_url: "https://graph.facebook.com".to_string(),
            api_version: "v15.0".to_string(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for WhatsAppClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClientConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// WhatsApp client for the Meta Graph API
#[derive(Clone)]
pub struct WhatsAppClient {
    client: Client,
    access_token: String,
    messages_url: String,
}

impl std::fmt::Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("messages_url", &self.messages_url)
            .finish_non_exhaustive()
    }
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: TextContent<'a>,
}

#[derive(Debug, Serialize)]
struct TextContent<'a> {
    body: &'a str,
}

/// API response for a sent message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messaging_product: String,
    #[serde(default)]
    pub contacts: Vec<ContactInfo>,
    #[serde(default)]
    pub messages: Vec<MessageInfo>,
}

impl SendMessageResponse {
    /// ID of the first accepted message, if the platform returned one
    #[must_use]
    pub fn message_id(&self) -> Option<&str> {
        self.messages.first().map(|m| m.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub input: String,
    pub wa_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
            ));
        }

        let messages_url = format!(
            "{}/{}/{}/messages",
            config.api_base_url.trim_end_matches('/'),
            config.api_version,
            config.phone_number_id
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(url = %messages_url, "Initialized WhatsApp client");

        Ok(Self {
            client,
            access_token: config.access_token,
            messages_url,
        })
    }

    /// Endpoint used for outbound messages
    #[must_use]
    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Send a plain-text message
    ///
    /// Any non-2xx status is returned as [`WhatsAppError::Api`] carrying the
    /// raw response body.
    #[instrument(skip(self, message), fields(to = %to))]
    pub async fn send_message(
        &self,
        to: &str,
        message: &str,
    ) -> Result<SendMessageResponse, WhatsAppError> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to,
            msg_type: "text",
            text: TextContent { body: message },
        };

        debug!(message_len = message.len(), "Sending WhatsApp message");

        let response = self
            .client
            .post(&self.messages_url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let sent: SendMessageResponse = response.json().await?;
            info!(message_id = ?sent.message_id(), "Message sent successfully");
            Ok(sent)
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "WhatsApp API rejected message");
            Err(WhatsAppError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
