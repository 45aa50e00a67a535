//! HTTP / WebSocket transport for the document server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, bind_with_fallback};
pub use state::AppState;
