//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! ```text
//! client → server: join-doc, send-changes, save-doc, leave-doc
//! server → client: load-doc, active-users, receive-changes, doc-saved
//! ```

use serde::{Deserialize, Serialize};

/// Messages sent from a client to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join the room of a document and request its current content
    #[serde(rename_all = "camelCase")]
    JoinDoc { doc_id: String },
    /// Full-content snapshot of a local edit, relayed to the other members
    #[serde(rename_all = "camelCase")]
    SendChanges { doc_id: String, content: String },
    /// Persist the given content
    #[serde(rename_all = "camelCase")]
    SaveDoc { doc_id: String, content: String },
    /// Leave the room of a document without disconnecting
    #[serde(rename_all = "camelCase")]
    LeaveDoc { doc_id: String },
}

/// Messages sent from the server to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Current content, sent only to the connection that joined
    LoadDoc { content: String },
    /// Number of connections currently in the room
    ActiveUsers { count: usize },
    /// Content relayed from another member
    ReceiveChanges { content: String },
    /// Save acknowledgement (RFC 3339, UTC)
    #[serde(rename_all = "camelCase")]
    DocSaved { saved_at: String },
}
