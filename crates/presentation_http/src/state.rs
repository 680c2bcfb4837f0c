//! Application state shared across handlers

use std::sync::Arc;

use application::WebhookService;
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration, read-only after startup
    pub config: Arc<AppConfig>,
    /// Webhook reply use case
    pub webhook_service: Arc<WebhookService>,
}

impl AppState {
    /// Create new application state
    #[must_use]
    pub fn new(config: AppConfig, webhook_service: WebhookService) -> Self {
        Self {
            config: Arc::new(config),
            webhook_service: Arc::new(webhook_service),
        }
    }
}
