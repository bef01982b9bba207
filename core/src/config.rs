//! Connection-level settings for a `VkClient`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://api.vk.com";
pub const DEFAULT_API_VERSION: &str = "5.131";
pub const DEFAULT_LANG: &str = "ru";

/// Token, endpoint, API version and language used for every request.
///
/// Only `token` is required when deserializing; the rest fall back to the
/// public VK endpoint, API version `5.131` and Russian-language responses.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub token: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_lang() -> String {
    DEFAULT_LANG.to_string()
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: default_endpoint(),
            api_version: default_api_version(),
            lang: default_lang(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// `{endpoint}/method/{method}`, tolerating a trailing `/` on the endpoint.
    pub fn method_url(&self, method: &str) -> String {
        format!("{}/method/{method}", self.endpoint.trim_end_matches('/'))
    }
}

// Keeps the token out of logs and panic messages.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("lang", &self.lang)
            .finish()
    }
}
