//! Reply generator adapter - Implements ReplyGeneratorPort using ai_core
//!
//! Works with any OpenAI-compatible chat-completion backend. Every fault is
//! logged and reported as "no reply" so the caller falls back to fixed text.

use std::sync::Arc;

use ai_core::{InferenceEngine, InferenceError, InferenceRequest, OpenAiChatEngine};
use application::ports::ReplyGeneratorPort;
use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use crate::config::GenerationConfig;

/// Adapter for optional AI-generated replies
///
/// The disabled variant holds no engine, so no client is ever built for it.
pub struct OpenAiReplyGenerator {
    engine: Option<Arc<dyn InferenceEngine>>,
    system_prompt: String,
}

impl std::fmt::Debug for OpenAiReplyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiReplyGenerator")
            .field("enabled", &self.engine.is_some())
            .field(
                "model",
                &self.engine.as_ref().map(|engine| engine.default_model()),
            )
            .finish_non_exhaustive()
    }
}

impl OpenAiReplyGenerator {
    /// Create a generator that never produces a reply
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            engine: None,
            system_prompt: String::new(),
        }
    }

    /// Create a generator around an existing engine
    #[must_use]
    pub fn with_engine(engine: Arc<dyn InferenceEngine>, system_prompt: impl Into<String>) -> Self {
        Self {
            engine: Some(engine),
            system_prompt: system_prompt.into(),
        }
    }

    /// Create a generator from configuration
    ///
    /// Returns the disabled variant when generation is switched off.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, InferenceError> {
        if !config.enabled {
            info!("Reply generation disabled");
            return Ok(Self::disabled());
        }

        let engine = OpenAiChatEngine::new(config.inference_config())?;
        Ok(Self::with_engine(Arc::new(engine), config.system_prompt.clone()))
    }
}

#[async_trait]
impl ReplyGeneratorPort for OpenAiReplyGenerator {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn generate(&self, text: &str) -> Option<String> {
        let engine = self.engine.as_ref()?;

        let request = InferenceRequest::with_system(&self.system_prompt, text);
        match engine.generate(request).await {
            Ok(response) => {
                let reply = response.content.trim();
                if reply.is_empty() {
                    warn!(model = %response.model, "Generated reply was empty");
                    return None;
                }
                debug!(
                    model = %response.model,
                    tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
                    "Reply generated"
                );
                Some(reply.to_string())
            },
            Err(e) => {
                warn!(error = %e, "Reply generation failed");
                None
            },
        }
    }

    fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }
}
