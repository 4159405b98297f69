//! Support-triage forwarding handler.
//!
//! `POST /api/support-triage` with `{message, sessionId}`:
//! 1. Validates both fields are present (an unparseable body is a generic 500)
//! 2. Repackages them as `{sessionId, action: "sendMessage", chatInput}`
//! 3. Makes one POST to the configured n8n webhook
//! 4. Relays the webhook's JSON body unchanged

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use tracing::{error, info};
use triage_core::webhook::WebhookPayload;

use super::required_str;
use crate::AppState;
use crate::error::{AppError, AppResult};

/// `POST /api/support-triage` - forward a chat message to the workflow.
pub async fn support_triage_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Response> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        error!("Error parsing triage request: {e}");
        AppError::Upstream(format!("invalid request body: {e}"))
    })?;

    let (Some(message), Some(session_id)) =
        (required_str(&body, "message"), required_str(&body, "sessionId"))
    else {
        return Err(AppError::Validation("Missing required fields".into()));
    };

    let payload = WebhookPayload::send_message(session_id, message);

    let relayed = state.webhook.forward(&payload).await.map_err(|e| {
        error!(session_id, "Error proxying to n8n: {e}");
        AppError::from(e)
    })?;

    info!(session_id, bytes = relayed.len(), "relayed triage response");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(relayed))
        .map_err(|e| AppError::Internal(format!("Response build failed: {e}")))
}
