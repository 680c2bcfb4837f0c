//! WhatsApp Cloud API configuration.

use integration_whatsapp::WhatsAppClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// WhatsApp integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Token compared during the webhook verification handshake
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Meta Graph API access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Phone number ID of the sending business number
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Graph API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// API version (default: v15.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Send request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field(
                "verify_token",
                &self.verify_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("phone_number_id", &self.phone_number_id)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v15.0".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            verify_token: None,
            access_token: None,
            phone_number_id: None,
            api_base_url: default_api_base_url(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Configured verify token, empty when unset
    #[must_use]
    pub fn verify_token_str(&self) -> &str {
        self.verify_token.as_deref().unwrap_or_default()
    }

    /// Build the send client configuration
    #[must_use]
    pub fn client_config(&self) -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            access_token: self.access_token_str().unwrap_or_default().to_string(),
            phone_number_id: self.phone_number_id.clone().unwrap_or_default(),
            api_base_url: self.api_base_url.clone(),
            api_version: self.api_version.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
