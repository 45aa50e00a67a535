//! Request handlers.

mod http;
mod websocket;

pub use http::{create_document, fetch_document, get_room_detail, health_check};
pub use websocket::websocket_handler;
