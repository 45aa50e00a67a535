//! UseCase layer: the document synchronization engine.
//!
//! One use case per operation. Each use case depends only on the domain
//! traits (`DocumentStore`, `SessionRegistry`, `MessagePusher`), which are
//! injected at startup.
//!
//! Channel events:
//! - `JoinDocumentUseCase`: join a room, reply with content, broadcast member count
//! - `RelayEditUseCase`: relay a content snapshot to the other members
//! - `SaveDocumentUseCase`: persist content, broadcast a save acknowledgement
//! - `LeaveDocumentUseCase` / `DisconnectClientUseCase`: leave one room / every room
//!
//! Point requests:
//! - `CreateDocumentUseCase`, `FetchDocumentUseCase`, `GetRoomDetailUseCase`

mod connect_client;
mod create_document;
mod disconnect_client;
mod error;
mod fetch_document;
mod get_room_detail;
mod join_document;
mod leave_document;
mod relay_edit;
mod save_document;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use create_document::{CreateDocumentUseCase, CreatedDocument};
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{FetchDocumentError, JoinDocumentError, SaveDocumentError};
pub use fetch_document::FetchDocumentUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use join_document::JoinDocumentUseCase;
pub use leave_document::LeaveDocumentUseCase;
pub use relay_edit::RelayEditUseCase;
pub use save_document::SaveDocumentUseCase;
