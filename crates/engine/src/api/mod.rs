//! API layer - HTTP and WebSocket entry points.

pub mod http;
pub mod sessions;
pub mod websocket;

pub use sessions::{SessionRouter, SharedSessionRouter};
