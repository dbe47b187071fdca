//! Wire types for the backend chat contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body: `POST {endpoint}` with `Content-Type: application/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Uuid,
}

/// Success response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Error response body. The `error` field is optional on the wire; an
/// error status may arrive with no body at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
