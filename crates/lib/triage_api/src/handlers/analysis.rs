//! Analysis handlers called by the workflow.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;
use tracing::error;
use triage_core::analysis::{self, Analysis, ResponseRequest};

use super::required_str;
use crate::AppState;
use crate::error::{AppError, AppResult};

/// Parse a JSON object body, or fail the way the workflow expects.
fn json_object(body: &Bytes) -> AppResult<Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
        .ok_or_else(|| AppError::Validation("No JSON data provided".into()))
}

/// `POST /analyze-support-request` - classify a support message.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<Analysis>> {
    let body = json_object(&body)?;
    let message = required_str(&body, "message")
        .ok_or_else(|| AppError::Validation("No message provided".into()))?;

    let result = analysis::analyze(state.completions.as_ref(), message)
        .await
        .map_err(|e| {
            error!("Error analyzing support request: {e}");
            AppError::from(e)
        })?;

    Ok(Json(result))
}

/// `POST /generate-response` - draft a reply wrapped in the triage response.
pub async fn generate_response_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let body = json_object(&body)?;
    if required_str(&body, "message").is_none() {
        return Err(AppError::Validation("No message provided".into()));
    }

    let request: ResponseRequest = serde_json::from_value(body)
        .map_err(|e| AppError::Validation(format!("Invalid request: {e}")))?;

    let response = analysis::generate_response(state.completions.as_ref(), &request)
        .await
        .map_err(|e| {
            error!("Error generating response: {e}");
            AppError::from(e)
        })?;

    Ok(Json(response))
}
