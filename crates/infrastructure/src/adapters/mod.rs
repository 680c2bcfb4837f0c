//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod reply_generator_adapter;
mod whatsapp_adapter;

pub use reply_generator_adapter::OpenAiReplyGenerator;
pub use whatsapp_adapter::WhatsAppMessengerAdapter;
