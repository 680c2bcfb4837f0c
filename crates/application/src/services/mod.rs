//! Application services - Use case implementations

mod webhook_service;

pub use webhook_service::{FALLBACK_REPLY, WebhookService};
