//! Domain layer for the collaborative document server.
//!
//! This module contains the document and room model plus the interfaces
//! (`DocumentStore`, `SessionRegistry`, `MessagePusher`) that the use cases
//! depend on. Concrete implementations live in the infrastructure layer.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{Document, Room};
pub use error::{MessagePushError, StoreError};
pub use event::SyncEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{DocumentStore, SessionRegistry};
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DocumentContent, DocumentId, DocumentIdFactory, Timestamp,
};
