//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use application::{
    ApplicationError, DeliveryReceipt, FALLBACK_REPLY, MessengerPort, OutgoingTextMessage,
    ReplyGeneratorPort, WebhookService,
};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use infrastructure::{AppConfig, WhatsAppConfig};
use presentation_http::{create_app, handlers::health::HealthResponse, state::AppState};
use serde_json::json;

const VERIFY_TOKEN: &str = "my-verify-token";

/// Messenger that records every send
#[derive(Default)]
struct RecordingMessenger {
    sent: Mutex<Vec<OutgoingTextMessage>>,
    fail: bool,
}

impl RecordingMessenger {
    fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    fn sent(&self) -> Vec<OutgoingTextMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessengerPort for RecordingMessenger {
    async fn send_text(
        &self,
        message: OutgoingTextMessage,
    ) -> Result<DeliveryReceipt, ApplicationError> {
        self.sent.lock().unwrap().push(message);
        if self.fail {
            return Err(ApplicationError::Delivery(
                "WhatsApp send failed: API error: 401 - invalid token".to_string(),
            ));
        }
        Ok(DeliveryReceipt {
            message_id: Some("wamid.test".to_string()),
        })
    }
}

/// Generator with a fixed answer
struct FixedGenerator(Option<String>);

#[async_trait]
impl ReplyGeneratorPort for FixedGenerator {
    async fn generate(&self, _text: &str) -> Option<String> {
        self.0.clone()
    }

    fn is_enabled(&self) -> bool {
        self.0.is_some()
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        whatsapp: WhatsAppConfig {
            verify_token: Some(VERIFY_TOKEN.to_string()),
            access_token: Some(secrecy::SecretString::from("test-token")),
            phone_number_id: Some("1234567890".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn server_with(generator: FixedGenerator, messenger: Arc<RecordingMessenger>) -> TestServer {
    let service = WebhookService::new(Arc::new(generator), messenger);
    let app = create_app(AppState::new(test_config(), service));
    TestServer::new(app).expect("test server")
}

fn default_server() -> (TestServer, Arc<RecordingMessenger>) {
    let messenger = Arc::new(RecordingMessenger::default());
    (server_with(FixedGenerator(None), messenger.clone()), messenger)
}

fn text_message_payload(from: &str, body: &str) -> serde_json::Value {
    json!({
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "WABA_ID",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "messages": [{
                        "from": from,
                        "id": "wamid.incoming",
                        "timestamp": "1700000000",
                        "type": "text",
                        "text": {"body": body}
                    }]
                }
            }]
        }]
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let (server, _) = default_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body: HealthResponse = response.json();
    assert_eq!(body.status, "ok");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

// ============================================================================
// Webhook verification (GET /webhook)
// ============================================================================

mod verification {
    use super::*;

    #[tokio::test]
    async fn echoes_challenge_as_integer() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "subscribe")
            .add_query_param("hub.verify_token", VERIFY_TOKEN)
            .add_query_param("hub.challenge", "1158201444")
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "1158201444");
        assert_eq!(response.json::<i64>(), 1_158_201_444);
    }

    #[tokio::test]
    async fn wrong_token_is_forbidden() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "subscribe")
            .add_query_param("hub.verify_token", "wrong")
            .add_query_param("hub.challenge", "42")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Verification failed");
    }

    #[tokio::test]
    async fn wrong_mode_is_forbidden() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "unsubscribe")
            .add_query_param("hub.verify_token", VERIFY_TOKEN)
            .add_query_param("hub.challenge", "42")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn mismatch_is_forbidden_even_with_bad_challenge() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "subscribe")
            .add_query_param("hub.verify_token", "wrong")
            .add_query_param("hub.challenge", "not-a-number")
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn non_numeric_challenge_is_bad_request() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "subscribe")
            .add_query_param("hub.verify_token", VERIFY_TOKEN)
            .add_query_param("hub.challenge", "abc")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_parameters_are_bad_request() {
        let (server, _) = default_server();

        let response = server
            .get("/webhook")
            .add_query_param("hub.mode", "subscribe")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn repeated_verification_is_identical() {
        let (server, messenger) = default_server();

        let mut bodies = Vec::new();
        for _ in 0..3 {
            let response = server
                .get("/webhook")
                .add_query_param("hub.mode", "subscribe")
                .add_query_param("hub.verify_token", VERIFY_TOKEN)
                .add_query_param("hub.challenge", "777")
                .await;
            response.assert_status_ok();
            bodies.push(response.text());
        }

        assert!(bodies.iter().all(|b| b == "777"));
        assert!(messenger.sent().is_empty());
    }
}

// ============================================================================
// Webhook delivery (POST /webhook)
// ============================================================================

mod delivery {
    use super::*;

    #[tokio::test]
    async fn replies_with_fallback_when_generation_disabled() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&text_message_payload("491701234567", "Hello there"))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
        assert_eq!(
            messenger.sent(),
            vec![OutgoingTextMessage::new("491701234567", FALLBACK_REPLY)]
        );
    }

    #[tokio::test]
    async fn replies_with_generated_text() {
        let messenger = Arc::new(RecordingMessenger::default());
        let server = server_with(
            FixedGenerator(Some("We open at 9.".to_string())),
            messenger.clone(),
        );

        let response = server
            .post("/webhook")
            .json(&text_message_payload("123", "When do you open?"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            messenger.sent(),
            vec![OutgoingTextMessage::new("123", "We open at 9.")]
        );
    }

    #[tokio::test]
    async fn only_first_message_is_answered() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&json!({
                "entry": [{
                    "changes": [{
                        "value": {
                            "messages": [
                                {"from": "first", "type": "text", "text": {"body": "a"}},
                                {"from": "second", "type": "text", "text": {"body": "b"}}
                            ]
                        }
                    }]
                }]
            }))
            .await;

        response.assert_status_ok();
        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, "first");
    }

    #[tokio::test]
    async fn non_text_message_is_still_answered() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&json!({
                "entry": [{
                    "changes": [{
                        "value": {
                            "messages": [{"from": "555", "type": "image", "image": {"id": "media-1"}}]
                        }
                    }]
                }]
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn status_callback_sends_nothing() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&json!({
                "object": "whatsapp_business_account",
                "entry": [{
                    "changes": [{
                        "value": {
                            "messaging_product": "whatsapp",
                            "statuses": [{"id": "wamid.1", "status": "delivered", "recipient_id": "123"}]
                        }
                    }]
                }]
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "OK");
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn numeric_timestamp_is_answered() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&json!({
                "entry": [{"changes": [{"value": {"messages": [
                    {"from": "1", "timestamp": 1_700_000_000, "text": {"body": "hi"}}
                ]}}]}]
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            messenger.sent(),
            vec![OutgoingTextMessage::new("1", FALLBACK_REPLY)]
        );
    }

    #[tokio::test]
    async fn unexpected_metadata_shapes_are_acknowledged() {
        let (server, messenger) = default_server();

        for body in [
            json!({"entry": [{"id": 102_290_129_340_398_u64, "changes": [{"value": {}}]}]}),
            json!({"entry": [{"changes": [{"value": {"statuses": [{
                "status": "failed",
                "errors": [{"code": 131_047, "title": "Re-engagement message"}]
            }]}}]}]}),
        ] {
            let response = server.post("/webhook").json(&body).await;
            response.assert_status_ok();
            assert_eq!(response.text(), "OK");
        }
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_object_sends_nothing() {
        let (server, messenger) = default_server();

        let response = server.post("/webhook").json(&json!({})).await;

        response.assert_status_ok();
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn empty_entry_list_sends_nothing() {
        let (server, messenger) = default_server();

        let response = server.post("/webhook").json(&json!({"entry": []})).await;

        response.assert_status_ok();
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn send_failure_is_internal_error() {
        let messenger = Arc::new(RecordingMessenger::failing());
        let server = server_with(FixedGenerator(None), messenger.clone());

        let response = server
            .post("/webhook")
            .json(&text_message_payload("123", "hi"))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Internal Server Error");
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn malformed_json_is_internal_error() {
        let (server, messenger) = default_server();

        let response = server.post("/webhook").text("{not json").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "Internal Server Error");
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn non_object_body_is_internal_error() {
        let (server, messenger) = default_server();

        for body in [json!([]), json!("text"), json!(42)] {
            let response = server.post("/webhook").json(&body).await;
            response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        }
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn message_without_sender_is_internal_error() {
        let (server, messenger) = default_server();

        let response = server
            .post("/webhook")
            .json(&json!({
                "entry": [{"changes": [{"value": {"messages": [{"text": {"body": "hi"}}]}}]}]
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(messenger.sent().is_empty());
    }
}
