//! Support request analysis.
//!
//! The service the n8n workflow calls to classify a request and draft the
//! structured triage response. Language-model access goes through
//! [`CompletionProvider`] so handlers and tests can swap the backend.
//!
//! # Public API
//!
//! - [`analyze`]: classify a message into category, urgency and escalation
//! - [`generate_response`]: draft a reply and wrap it in the triage response shape
//! - [`groq::GroqProvider`]: OpenAI-compatible chat completions client

pub mod classify;
pub mod groq;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use rand::Rng;
use thiserror::Error;

pub use classify::{Classification, classify};

const CLASSIFIER_PROMPT: &str = "You are a support request analyzer. Classify the following message into one of these categories: 'technical-issue', 'billing-question', 'feature-request', 'general-inquiry'. Also extract urgency level (low, medium, high) and identify if it requires human attention.";

const CLASSIFIER_TEMPERATURE: f32 = 0.1;
const RESPONDER_TEMPERATURE: f32 = 0.7;

/// Fixed acknowledgement returned in the triage response `message`.
pub const ACKNOWLEDGEMENT: &str = "Thank you for your message. We've analyzed your request.";

/// Errors from analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Single system + user turn; returns the assistant text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String, AnalysisError>;
}

/// Output of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub category: String,
    pub urgency: String,
    pub needs_human: bool,
    pub raw_analysis: String,
}

/// Input to [`generate_response`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseRequest {
    pub message: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_urgency")]
    pub urgency: String,
}

fn default_category() -> String {
    "general-inquiry".to_string()
}

fn default_urgency() -> String {
    "medium".to_string()
}

/// Classify a support message.
pub async fn analyze(
    provider: &dyn CompletionProvider,
    message: &str,
) -> Result<Analysis, AnalysisError> {
    let raw = provider
        .complete(CLASSIFIER_PROMPT, message, CLASSIFIER_TEMPERATURE)
        .await?;
    let Classification {
        category,
        urgency,
        needs_human,
    } = classify(&raw);

    Ok(Analysis {
        category: category.to_string(),
        urgency: urgency.to_string(),
        needs_human,
        raw_analysis: raw,
    })
}

/// Draft a reply and return the full triage response.
pub async fn generate_response(
    provider: &dyn CompletionProvider,
    request: &ResponseRequest,
) -> Result<Value, AnalysisError> {
    let system = format!(
        "You are a helpful customer support agent. Generate a friendly, professional response to this {} message. If you don't know the specific answer, offer to connect them with a support specialist.",
        request.category
    );
    let reply = provider
        .complete(&system, &request.message, RESPONDER_TEMPERATURE)
        .await?;

    Ok(triage_response(&request.category, &request.urgency, &reply))
}

/// Wrap a drafted reply in the structure the chat client renders.
pub fn triage_response(category: &str, urgency: &str, reply: &str) -> Value {
    let ticket_id = format!("AUT-{}", random_below(100));
    let ticket_number = (10_000 + random_below(1_000)).to_string();
    let spaced = category.replace('-', " ");

    json!({
        "success": true,
        "message": ACKNOWLEDGEMENT,
        "details": {
            "category": title_case(&spaced),
            "urgency": urgency,
            "ticketInfo": {
                "created": true,
                "ticketId": ticket_id,
                "ticketNumber": ticket_number,
                "status": "Open"
            },
            "nextSteps": format!(
                "Our support team will address your {spaced} issue urgently. Please reference ticket {ticket_id} in any further communication."
            ),
            "notifications": {
                "email": false,
                "slack": true
            },
            "suggestedReply": reply
        },
        "metadata": {
            "timestamp": Utc::now().to_rfc3339(),
            "requestId": format!("req-{}", random_below(1_000_000)),
            "aiProcessed": true,
            "autoResponded": false
        }
    })
}

fn random_below(bound: u32) -> u32 {
    rand::rng().random_range(0..bound)
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
