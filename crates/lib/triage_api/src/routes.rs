//! Route paths.

pub const GET_HEALTH: &str = "/health";
pub const POST_API_SUPPORT_TRIAGE: &str = "/api/support-triage";
pub const POST_ANALYZE_SUPPORT_REQUEST: &str = "/analyze-support-request";
pub const POST_GENERATE_RESPONSE: &str = "/generate-response";
