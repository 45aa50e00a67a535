//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Warning attached to `POST /create` when the new document could not be persisted
pub const PERSIST_FAILED_WARNING: &str = "persist_failed";

/// Response of `POST /create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Response of `GET /doc/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDto {
    pub id: String,
    pub content: String,
}

/// Response of `GET /api/rooms/{document_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub document_id: String,
    pub active_users: usize,
}

/// Error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
