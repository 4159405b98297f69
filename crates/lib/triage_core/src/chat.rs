//! Chat client state machine.
//!
//! Holds the session id, the append-only history and the latest triage
//! response, mirrors history into [`LocalStore`] on every change, and talks to
//! the forwarding endpoint through a [`TriageTransport`].
//!
//! States are `Idle` and `Submitting`. `submit` takes `&mut self`, so at most
//! one request per client is ever in flight.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::ChatMessage;
use crate::session::SessionId;
use crate::storage::{CHAT_HISTORY_KEY, LocalStore, StorageError};
use crate::triage::DetailsPanel;

/// Bot text used when the response carries no `message` string.
pub const FALLBACK_REPLY: &str = "Thank you for your message. We'll get back to you soon.";

/// Reason used when the endpoint rejects a request without an `error` field.
pub const FALLBACK_FAILURE: &str = "Failed to process your request";

/// Errors from a single round trip to the forwarding endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to reach triage service: {0}")]
    Request(String),

    #[error("Invalid response from triage service: {0}")]
    Decode(String),

    /// Non-success status; carries the endpoint's `error` text.
    #[error("{0}")]
    Rejected(String),
}

/// Errors that abort a client operation (as opposed to a failed submission,
/// which is recorded in the history).
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to serialize chat history: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Sends one message to the triage service.
#[async_trait]
pub trait TriageTransport: Send + Sync {
    async fn send(&self, message: &str, session_id: &SessionId) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: TriageTransport + ?Sized> TriageTransport for Arc<T> {
    async fn send(&self, message: &str, session_id: &SessionId) -> Result<Value, TransportError> {
        (**self).send(message, session_id).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TriageRequest<'a> {
    message: &'a str,
    session_id: &'a str,
}

/// Transport posting to the forwarding endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl TriageTransport for HttpTransport {
    async fn send(&self, message: &str, session_id: &SessionId) -> Result<Value, TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&TriageRequest {
                message,
                session_id: session_id.as_str(),
            })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))?;

        if !status.is_success() {
            let reason = data
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(FALLBACK_FAILURE);
            return Err(TransportError::Rejected(reason.to_string()));
        }

        Ok(data)
    }
}

/// Whether a request is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    Submitting,
}

/// Result of a `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input was blank or a request was already in flight.
    Ignored,
    /// The service answered; holds the bot reply text.
    Answered(String),
    /// The round trip failed; holds the reason shown to the user.
    Failed(String),
}

/// Stateful chat client.
pub struct ChatClient<T> {
    store: LocalStore,
    transport: T,
    session_id: SessionId,
    history: Vec<ChatMessage>,
    input: String,
    last_response: Option<Value>,
    state: ChatState,
}

impl<T: TriageTransport> ChatClient<T> {
    /// Restore session and history from `store`.
    ///
    /// A corrupt history entry is logged and treated as empty.
    pub fn open(store: LocalStore, transport: T) -> Result<Self, ChatError> {
        let session_id = SessionId::load_or_create(&store)?;

        let history: Vec<ChatMessage> = match store.get(CHAT_HISTORY_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Failed to parse chat history: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };

        debug!(%session_id, messages = history.len(), "chat client opened");

        Ok(Self {
            store,
            transport,
            session_id,
            history,
            input: String::new(),
            last_response: None,
            state: ChatState::Idle,
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Latest successful triage response, if any.
    pub fn last_response(&self) -> Option<&Value> {
        self.last_response.as_ref()
    }

    pub fn details(&self) -> DetailsPanel {
        self.last_response
            .as_ref()
            .map(DetailsPanel::from_response)
            .unwrap_or_else(DetailsPanel::empty)
    }

    /// Submit the current input.
    ///
    /// On success the input is cleared; on failure it is kept so the user
    /// can retry. Either way the client ends `Idle`.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, ChatError> {
        if self.state == ChatState::Submitting || self.input.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let message = self.input.clone();
        self.push(ChatMessage::user(&message))?;
        self.state = ChatState::Submitting;

        let result = self.transport.send(&message, &self.session_id).await;
        self.state = ChatState::Idle;

        match result {
            Ok(data) => {
                let reply = data
                    .get("message")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(FALLBACK_REPLY)
                    .to_string();
                self.last_response = Some(data.clone());
                self.push(ChatMessage::bot(&reply, data))?;
                self.input.clear();
                Ok(SubmitOutcome::Answered(reply))
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(session_id = %self.session_id, "triage request failed: {reason}");
                self.push(ChatMessage::error(&reason))?;
                Ok(SubmitOutcome::Failed(reason))
            }
        }
    }

    /// Convenience for `set_input` followed by `submit`.
    pub async fn send(&mut self, message: impl Into<String>) -> Result<SubmitOutcome, ChatError> {
        self.set_input(message);
        self.submit().await
    }

    /// Drop the conversation, its persisted copy and the details panel.
    /// The session id is kept.
    pub fn clear_conversation(&mut self) -> Result<(), ChatError> {
        self.history.clear();
        self.last_response = None;
        self.store.remove(CHAT_HISTORY_KEY)?;
        Ok(())
    }

    fn push(&mut self, message: ChatMessage) -> Result<(), ChatError> {
        self.history.push(message);
        let raw = serde_json::to_string(&self.history)?;
        self.store.set(CHAT_HISTORY_KEY, &raw)?;
        Ok(())
    }
}
