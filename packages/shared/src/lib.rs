//! Utilities shared by the Tsuzuri server and client.

pub mod logger;
pub mod time;
