//! API server configuration.

use thiserror::Error;
use triage_core::analysis::groq;

/// Webhook used when `N8N_WEBHOOK_URL` is not set.
pub const DEFAULT_WEBHOOK_URL: &str =
    "http://54.38.189.103:5678/webhook/b07ae64a-337e-47fb-9534-b6eda0981ca3/chat";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3100";

/// Configuration errors detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid webhook URL {url:?}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3100").
    pub bind_addr: String,
    /// n8n webhook the support-triage endpoint forwards to.
    pub webhook_url: String,
    /// Groq API key for the analysis endpoints.
    pub groq_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible Groq API.
    pub groq_base_url: String,
    /// Model used for classification and replies.
    pub groq_model: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                         |
    /// |--------------------|---------------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:3100`                |
    /// | `N8N_WEBHOOK_URL`  | hosted n8n chat webhook         |
    /// | `GROQ_API_KEY`     | unset                           |
    /// | `GROQ_BASE_URL`    | `https://api.groq.com/openai/v1`|
    /// | `GROQ_MODEL`       | `mistral-large-latest`          |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into()),
            webhook_url: std::env::var("N8N_WEBHOOK_URL")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.into()),
            groq_api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
            groq_base_url: std::env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| groq::DEFAULT_BASE_URL.into()),
            groq_model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| groq::DEFAULT_MODEL.into()),
        }
    }

    /// Defaults for everything, forwarding to `webhook_url`.
    pub fn with_webhook(webhook_url: impl Into<String>) -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            webhook_url: webhook_url.into(),
            groq_api_key: None,
            groq_base_url: groq::DEFAULT_BASE_URL.into(),
            groq_model: groq::DEFAULT_MODEL.into(),
        }
    }

    /// Checks that the webhook URL is an absolute http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidWebhookUrl {
            url: self.webhook_url.clone(),
            reason,
        };
        let parsed: url::Url = self
            .webhook_url
            .parse()
            .map_err(|e: url::ParseError| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", parsed.scheme())));
        }
        Ok(())
    }
}
