//! Mudlark Protocol - Wire types shared by the server and its clients
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and uuid
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - raw `uuid::Uuid` on the wire

pub mod messages;

pub use messages::{ClientMessage, ServerMessage};
