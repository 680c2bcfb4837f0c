//! Reply generator port - Optional AI-generated replies

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;

/// Port for generating a reply to an incoming message
///
/// `None` means "no generated reply, use the fallback text". Implementations
/// return `None` both when generation is disabled and when it fails, and
/// never surface an error to the caller.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReplyGeneratorPort: Send + Sync {
    /// Generate a reply for the given message text
    async fn generate(&self, text: &str) -> Option<String>;

    /// Whether generation is enabled at all
    fn is_enabled(&self) -> bool;
}
