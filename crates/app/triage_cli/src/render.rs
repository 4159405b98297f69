//! Plain-text rendering of the conversation and the details panel.

use std::fmt::Write;

use chrono::{DateTime, Local, NaiveDateTime};
use triage_core::models::chat::ChatMessage;
use triage_core::triage::DetailsPanel;

use crate::Result;

const EMPTY_HISTORY: &str =
    "Describe your support issue to get started.\nOur AI will analyze and route your request.\n";

/// `[HH:MM] Speaker: content` in local time.
pub fn render_message(msg: &ChatMessage) -> String {
    format!(
        "[{}] {}: {}",
        msg.timestamp.with_timezone(&Local).format("%H:%M"),
        msg.kind.label(),
        msg.content
    )
}

pub fn render_history(history: &[ChatMessage]) -> String {
    if history.is_empty() {
        return EMPTY_HISTORY.to_string();
    }
    history
        .iter()
        .map(|m| format!("{}\n", render_message(m)))
        .collect()
}

pub fn render_details(panel: &DetailsPanel) -> Result<String> {
    if panel.is_empty() {
        return Ok(
            "No active request\nSubmit a support request to see detailed information\n".to_string(),
        );
    }

    let mut out = String::from("Request Details\n");

    let badges: Vec<String> = panel
        .category
        .iter()
        .cloned()
        .chain(panel.urgency.as_ref().map(|u| u.label()))
        .map(|b| format!("[{b}]"))
        .collect();
    if !badges.is_empty() {
        writeln!(out, "  {}", badges.join(" "))?;
    }

    if let Some(ticket) = &panel.ticket {
        out.push_str("Ticket Information\n");
        writeln!(out, "  Ticket ID: {}", ticket.ticket_id.as_deref().unwrap_or(""))?;
        if let Some(number) = &ticket.ticket_number {
            writeln!(out, "  Number:    {number}")?;
        }
        writeln!(out, "  Status:    {}", ticket.status.as_deref().unwrap_or(""))?;
    }

    if let Some(steps) = &panel.next_steps {
        out.push_str("Next Steps\n");
        writeln!(out, "  {steps}")?;
    }

    if let Some(n) = panel.notifications {
        let channels: Vec<&str> = [(n.email, "Email"), (n.slack, "Slack")]
            .into_iter()
            .filter_map(|(sent, name)| sent.then_some(name))
            .collect();
        out.push_str("Notifications Sent\n");
        writeln!(
            out,
            "  {}",
            if channels.is_empty() {
                "(none)".to_string()
            } else {
                channels.join(" ")
            }
        )?;
    }

    if let Some(meta) = &panel.metadata {
        out.push_str("Request Metadata\n");
        if let Some(ts) = &meta.timestamp {
            writeln!(out, "  Timestamp:      {}", local_timestamp(ts))?;
        }
        if let Some(id) = &meta.request_id {
            writeln!(out, "  Request ID:     {id}")?;
        }
        if let Some(flag) = meta.ai_processed {
            writeln!(out, "  AI Processed:   {}", yes_no(flag))?;
        }
        if let Some(flag) = meta.auto_responded {
            writeln!(out, "  Auto-responded: {}", yes_no(flag))?;
        }
    }

    Ok(out)
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Zoned timestamps are shown in local time; naive ones as written.
fn local_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M:%S";
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Local).format(DISPLAY).to_string();
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return ts.format(DISPLAY).to_string();
    }
    raw.to_string()
}
