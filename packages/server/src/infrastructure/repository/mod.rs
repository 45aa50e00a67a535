//! Repository 実装
//!
//! - `inmemory`: HashMap を使ったインメモリ実装（SessionRegistry, DocumentStore）
//! - `sqlite`: SQLite を使った DocumentStore 実装

pub mod inmemory;
pub mod sqlite;

pub use inmemory::{InMemoryDocumentStore, InMemorySessionRegistry};
pub use sqlite::SqliteDocumentStore;
