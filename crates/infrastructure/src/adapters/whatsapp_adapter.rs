//! WhatsApp messenger adapter
//!
//! Implements the `MessengerPort` trait using the WhatsApp integration crate.

use application::error::ApplicationError;
use application::ports::{DeliveryReceipt, MessengerPort, OutgoingTextMessage};
use async_trait::async_trait;
use integration_whatsapp::{WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
use tracing::{debug, instrument};

/// Adapter that implements `MessengerPort` using `WhatsAppClient`
pub struct WhatsAppMessengerAdapter {
    client: WhatsAppClient,
}

impl WhatsAppMessengerAdapter {
    /// Create a new WhatsApp messenger adapter
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        Ok(Self {
            client: WhatsAppClient::new(config)?,
        })
    }

    /// Get a reference to the underlying client
    #[must_use]
    pub const fn client(&self) -> &WhatsAppClient {
        &self.client
    }

    fn map_error(e: WhatsAppError) -> ApplicationError {
        match e {
            WhatsAppError::Configuration(msg) => ApplicationError::Configuration(msg),
            e => ApplicationError::Delivery(format!("WhatsApp send failed: {e}")),
        }
    }
}

impl std::fmt::Debug for WhatsAppMessengerAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppMessengerAdapter")
            .field("client", &self.client)
            .finish()
    }
}

#[async_trait]
impl MessengerPort for WhatsAppMessengerAdapter {
    #[instrument(skip(self, message), fields(recipient = %message.recipient))]
    async fn send_text(
        &self,
        message: OutgoingTextMessage,
    ) -> Result<DeliveryReceipt, ApplicationError> {
        let response = self
            .client
            .send_message(&message.recipient, &message.text)
            .await
            .map_err(Self::map_error)?;

        let message_id = response.message_id().map(str::to_string);
        debug!(message_id = ?message_id, "WhatsApp text message sent");

        Ok(DeliveryReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            access_token: "test-token".to_string(),
            phone_number_id: "1234567890".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = WhatsAppMessengerAdapter::new(WhatsAppClientConfig::default());
        assert!(matches!(result, Err(WhatsAppError::Configuration(_))));
    }

    #[test]
    fn exposes_client() {
        let adapter = WhatsAppMessengerAdapter::new(test_config()).unwrap();
        assert_eq!(
            adapter.client().messages_url(),
            "https://graph.facebook.com/v15.0/1234567890/messages"
        );
    }

    #[test]
    fn api_error_maps_to_delivery() {
        let err = WhatsAppMessengerAdapter::map_error(WhatsAppError::Api {
            status: 401,
            body: "invalid token".to_string(),
        });
        assert!(
            matches!(err, ApplicationError::Delivery(ref msg) if msg.contains("401") && msg.contains("invalid token"))
        );
    }

    #[test]
    fn configuration_error_is_preserved() {
        let err = WhatsAppMessengerAdapter::map_error(WhatsAppError::Configuration(
            "access_token is required".to_string(),
        ));
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let adapter = WhatsAppMessengerAdapter::new(test_config()).unwrap();
        assert!(!format!("{adapter:?}").contains("test-token"));
    }
}
