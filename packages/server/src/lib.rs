//! Realtime collaborative document server library.
//!
//! Clients join a document room over WebSocket, receive its content, relay
//! full-content edits to the other members, and save snapshots to a
//! document store. Concurrent edits are not merged: the last message a
//! client receives wins, and the last completed save is what persists.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
