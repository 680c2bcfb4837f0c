//! WhatsApp webhook handlers
//!
//! `GET /webhook` answers the subscription verification handshake.
//! `POST /webhook` replies to the first message of a delivery.

use application::IncomingTextMessage;
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
};
use integration_whatsapp::{WebhookPayload, verify_subscription};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Body of every successful delivery acknowledgement
pub const OK_BODY: &str = "OK";

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct WebhookVerifyQuery {
    /// The mode (should be "subscribe")
    #[serde(rename = "hub.mode")]
    pub hub_mode: String,
    /// The verify token to validate
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: String,
    /// The challenge to return on success
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: String,
}

/// WhatsApp webhook verification (GET)
///
/// Echoes the challenge as an integer when mode and token match.
#[instrument(skip(state, query), fields(mode = %query.hub_mode))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> Result<Json<i64>, ApiError> {
    info!("Webhook verification requested");

    let challenge = verify_subscription(
        &query.hub_mode,
        &query.hub_verify_token,
        &query.hub_challenge,
        state.config.whatsapp.verify_token_str(),
    )?;

    info!("Webhook verified successfully");
    Ok(Json(challenge))
}

/// WhatsApp webhook delivery (POST)
///
/// Always answers `200 OK` unless parsing or sending the reply fails.
#[instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn handle_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), ApiError> {
    let payload = WebhookPayload::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Malformed webhook payload");
        ApiError::MalformedPayload(e.to_string())
    })?;

    let Some(message) = payload.first_message() else {
        debug!("Webhook delivery carried no message");
        return Ok((StatusCode::OK, OK_BODY));
    };

    let incoming = IncomingTextMessage::new(message.from.clone(), message.body());
    state.webhook_service.reply_to(&incoming).await?;

    Ok((StatusCode::OK, OK_BODY))
}
