//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod locks;
pub mod memory;
pub mod ports;
pub mod random;
pub mod sqlite;
