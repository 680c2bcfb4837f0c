//! Reply Bridge HTTP Server
//!
//! Main entry point for the webhook server.

use std::{sync::Arc, time::Duration};

use application::WebhookService;
use infrastructure::{AppConfig, OpenAiReplyGenerator, WhatsAppMessengerAdapter, init_tracing};
use presentation_http::{ShutdownOutcome, create_app, serve_with_deadline, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration errors are fatal and must surface before anything binds
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.log_level, config.server.log_format)?;

    info!("Reply Bridge v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = %config.server.port,
        generation_enabled = config.generation.enabled,
        "Configuration loaded"
    );

    let messenger = WhatsAppMessengerAdapter::new(config.whatsapp.client_config())
        .map_err(|e| anyhow::anyhow!("Failed to initialize WhatsApp client: {e}"))?;
    let reply_generator = OpenAiReplyGenerator::from_config(&config.generation)
        .map_err(|e| anyhow::anyhow!("Failed to initialize reply generation: {e}"))?;

    let webhook_service = WebhookService::new(Arc::new(reply_generator), Arc::new(messenger));

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let app = create_app(AppState::new(config, webhook_service));

    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    match serve_with_deadline(listener, app, shutdown_signal(), shutdown_timeout).await? {
        ShutdownOutcome::Drained => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("Server shutdown forced after timeout"),
    }

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
