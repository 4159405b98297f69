//! Read-only view over a triage response.
//!
//! The response shape belongs to the external workflow. Nothing here
//! validates it: every field is optional, wrong types are treated as absent,
//! and truthiness follows JSON-in-JavaScript rules (`0`, `""`, `false`,
//! `null` are falsy).

use serde_json::Value;

/// Urgency as reported by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Urgency {
    High,
    Medium,
    Low,
    Other(String),
}

impl Urgency {
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "high" => Urgency::High,
            "medium" => Urgency::Medium,
            "low" => Urgency::Low,
            _ => Urgency::Other(raw.to_string()),
        }
    }

    /// Badge text, e.g. `HIGH Priority`.
    pub fn label(&self) -> String {
        let name = match self {
            Urgency::High => "HIGH".to_string(),
            Urgency::Medium => "MEDIUM".to_string(),
            Urgency::Low => "LOW".to_string(),
            Urgency::Other(raw) => raw.to_uppercase(),
        };
        format!("{name} Priority")
    }
}

/// Ticket created by the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketInfo {
    pub ticket_id: Option<String>,
    pub ticket_number: Option<String>,
    pub status: Option<String>,
}

/// Channels the workflow notified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notifications {
    pub email: bool,
    pub slack: bool,
}

/// Request metadata attached by the workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub timestamp: Option<String>,
    pub request_id: Option<String>,
    pub ai_processed: Option<bool>,
    pub auto_responded: Option<bool>,
}

/// Everything the details panel shows for the latest response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsPanel {
    pub category: Option<String>,
    pub urgency: Option<Urgency>,
    /// Present only when the workflow reports the ticket as created.
    pub ticket: Option<TicketInfo>,
    pub next_steps: Option<String>,
    pub notifications: Option<Notifications>,
    pub metadata: Option<RequestMetadata>,
    populated: bool,
}

impl DetailsPanel {
    /// Panel state before any response arrived (or after clearing).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_response(response: &Value) -> Self {
        let details = response.get("details").filter(|d| truthy(d));

        let category = details.and_then(|d| text_field(d, "category"));
        let urgency = details
            .and_then(|d| text_field(d, "urgency"))
            .map(|u| Urgency::parse(&u));

        let ticket = details
            .and_then(|d| d.get("ticketInfo"))
            .filter(|t| truthy(t) && t.get("created").is_some_and(truthy))
            .map(|t| TicketInfo {
                ticket_id: scalar_text(t.get("ticketId")),
                ticket_number: text_field(t, "ticketNumber"),
                status: scalar_text(t.get("status")),
            });

        let next_steps = details.and_then(|d| text_field(d, "nextSteps"));

        let notifications = details
            .and_then(|d| d.get("notifications"))
            .filter(|n| truthy(n))
            .map(|n| Notifications {
                email: n.get("email").is_some_and(truthy),
                slack: n.get("slack").is_some_and(truthy),
            });

        let metadata = response
            .get("metadata")
            .filter(|m| truthy(m))
            .map(|m| RequestMetadata {
                timestamp: text_field(m, "timestamp"),
                request_id: text_field(m, "requestId"),
                ai_processed: m.get("aiProcessed").map(truthy),
                auto_responded: m.get("autoResponded").map(truthy),
            });

        Self {
            category,
            urgency,
            ticket,
            next_steps,
            notifications,
            metadata,
            populated: true,
        }
    }

    /// True for the "no active request" state.
    pub fn is_empty(&self) -> bool {
        !self.populated
    }
}

/// JavaScript truthiness for JSON values.
pub(crate) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Scalar field rendered as text, dropped when falsy.
fn text_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)
        .filter(|v| truthy(v))
        .and_then(|v| scalar_text(Some(v)))
}
