//! Conversion logic between DTOs and domain types.

use tsuzuri_shared::time::timestamp_to_rfc3339;

use crate::domain::{Document, SyncEvent};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<&SyncEvent> for dto::ServerMessage {
    fn from(event: &SyncEvent) -> Self {
        match event {
            SyncEvent::DocumentLoaded { content } => Self::LoadDoc {
                content: content.as_str().to_string(),
            },
            SyncEvent::ActiveUsers { count } => Self::ActiveUsers { count: *count },
            SyncEvent::ContentChanged { content } => Self::ReceiveChanges {
                content: content.as_str().to_string(),
            },
            SyncEvent::DocumentSaved { saved_at } => Self::DocSaved {
                saved_at: timestamp_to_rfc3339(saved_at.value()),
            },
        }
    }
}

impl From<Document> for http::DocumentDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id.into_string(),
            content: document.content.into_string(),
        }
    }
}
