pub mod document;
pub mod session;

pub use document::InMemoryDocumentStore;
pub use session::InMemorySessionRegistry;
