//! Terminal client for the Tsuzuri collaborative document server.
//!
//! Opens (or creates) a document, relays typed lines to the other editors
//! of the same document and saves the buffer periodically.

pub mod api;
pub mod buffer;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientConfig, run_client};
