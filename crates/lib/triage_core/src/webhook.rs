//! Outbound webhook forwarding.
//!
//! Repackages a chat message into the body the n8n chat workflow expects and
//! performs exactly one POST per message. No retry and no timeout: a hanging
//! workflow blocks that single call.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Action tag the n8n chat trigger dispatches on.
pub const SEND_MESSAGE_ACTION: &str = "sendMessage";

/// Errors from the outbound call.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Webhook request failed: {0}")]
    Request(String),

    #[error("Webhook returned invalid JSON: {0}")]
    Decode(String),
}

/// Body posted to the workflow webhook.
///
/// Sent as a bare object: wrapping it in an array makes n8n nest the fields
/// under a `"0"` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub session_id: String,
    pub action: String,
    pub chat_input: String,
}

impl WebhookPayload {
    /// Payload for a user chat message.
    pub fn send_message(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            action: SEND_MESSAGE_ACTION.to_string(),
            chat_input: message.into(),
        }
    }
}

/// Client for the configured workflow webhook.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward a payload and return the downstream body.
    ///
    /// The body must parse as JSON, but the original bytes are returned so the
    /// caller can relay them unchanged. The downstream status code is not
    /// inspected.
    pub async fn forward(&self, payload: &WebhookPayload) -> Result<Vec<u8>, ForwardError> {
        debug!(url = %self.url, session_id = %payload.session_id, "forwarding to webhook");

        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ForwardError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ForwardError::Request(e.to_string()))?;

        serde_json::from_slice::<serde_json::Value>(&body)
            .map_err(|e| ForwardError::Decode(e.to_string()))?;

        debug!(%status, bytes = body.len(), "webhook responded");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_message_payload_has_fixed_shape() {
        let payload = WebhookPayload::send_message("session_1_abc", "My printer is on fire");
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "sessionId": "session_1_abc",
                "action": "sendMessage",
                "chatInput": "My printer is on fire"
            })
        );
    }

    #[test]
    fn payload_is_not_wrapped_in_array() {
        let payload = WebhookPayload::send_message("s", "m");
        let text = serde_json::to_string(&payload).expect("serialize");
        assert!(text.starts_with('{'));
    }

    #[tokio::test]
    async fn unreachable_webhook_is_request_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = WebhookClient::new(Client::new(), format!("http://{addr}/webhook"));
        let err = client
            .forward(&WebhookPayload::send_message("s", "m"))
            .await
            .unwrap_err();
        assert!(matches!(err, ForwardError::Request(_)));
    }
}
