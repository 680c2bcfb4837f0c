//! Webhook reply service
//!
//! Turns one incoming message into one outgoing reply: ask the reply
//! generator, fall back to a fixed text, send through the messenger.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{
        DeliveryReceipt, IncomingTextMessage, MessengerPort, OutgoingTextMessage,
        ReplyGeneratorPort,
    },
};

/// Reply sent when no generated reply is available
pub const FALLBACK_REPLY: &str = "Hello! Thanks for your message.";

/// Service that answers incoming webhook messages
pub struct WebhookService {
    reply_generator: Arc<dyn ReplyGeneratorPort>,
    messenger: Arc<dyn MessengerPort>,
}

impl std::fmt::Debug for WebhookService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookService")
            .field("generation_enabled", &self.reply_generator.is_enabled())
            .finish_non_exhaustive()
    }
}

impl WebhookService {
    /// Create a new webhook service
    pub fn new(
        reply_generator: Arc<dyn ReplyGeneratorPort>,
        messenger: Arc<dyn MessengerPort>,
    ) -> Self {
        Self {
            reply_generator,
            messenger,
        }
    }

    /// Reply to an incoming message
    ///
    /// Generation never fails from the caller's point of view; a delivery
    /// failure is logged and returned.
    #[instrument(skip(self, message), fields(sender = %message.sender))]
    pub async fn reply_to(
        &self,
        message: &IncomingTextMessage,
    ) -> Result<DeliveryReceipt, ApplicationError> {
        info!(text_len = message.text.len(), "Message received");

        let reply = if let Some(generated) = self.reply_generator.generate(&message.text).await {
            generated
        } else {
            debug!("No generated reply, using fallback");
            FALLBACK_REPLY.to_string()
        };

        match self
            .messenger
            .send_text(OutgoingTextMessage::reply_to(message, reply))
            .await
        {
            Ok(receipt) => {
                info!(message_id = ?receipt.message_id, "Reply sent successfully");
                Ok(receipt)
            },
            Err(e) => {
                error!(error = %e, "Failed to send reply");
                Err(e)
            },
        }
    }
}
