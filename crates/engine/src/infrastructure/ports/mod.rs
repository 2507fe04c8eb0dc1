//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - World storage (in-memory or SQLite)
//! - Session presence (so logout can see live sessions)
//! - Randomness (for testing)

mod error;
mod presence;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{ConnectionRepo, PlayerRepo, RoomRepo};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockConnectionRepo, MockPlayerRepo, MockRoomRepo};

// =============================================================================
// Session Ports
// =============================================================================
pub use presence::SessionPresence;

#[cfg(test)]
pub use presence::MockSessionPresence;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
