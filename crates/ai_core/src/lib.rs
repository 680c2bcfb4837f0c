//! AI Core - Chat-completion inference
//!
//! Provides the inference port and an engine for OpenAI-compatible
//! `/chat/completions` APIs.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiChatEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
