//! WhatsApp integration
//!
//! Handles WhatsApp Cloud API webhooks and outbound text messages.

pub mod client;
pub mod webhook;

pub use client::{SendMessageResponse, WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
pub use webhook::{
    SUBSCRIBE_MODE, VerificationError, WebhookMessage, WebhookPayload, verify_subscription,
};
