//! Keyword classification of model output.
//!
//! The classifier prompt asks for free text, so the result is read by
//! substring matching on the lower-cased answer. Anything unrecognised falls
//! back to `general-inquiry`, `medium`, and escalation to a human.

/// Category, urgency and escalation read from an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: &'static str,
    pub urgency: &'static str,
    pub needs_human: bool,
}

pub fn classify(analysis: &str) -> Classification {
    let text = analysis.to_lowercase();

    let category = if text.contains("technical-issue") {
        "technical-issue"
    } else if text.contains("billing") {
        "billing-question"
    } else if text.contains("feature") {
        "feature-request"
    } else {
        "general-inquiry"
    };

    let urgency = if text.contains("urgency: high") {
        "high"
    } else if text.contains("urgency: low") {
        "low"
    } else {
        "medium"
    };

    Classification {
        category,
        urgency,
        needs_human: !text.contains("human attention: no"),
    }
}
