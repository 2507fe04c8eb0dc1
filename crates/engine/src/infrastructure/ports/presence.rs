//! Session presence port.

use async_trait::async_trait;
use mudlark_domain::PlayerId;

/// Answers whether a player still has a live session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionPresence: Send + Sync {
    async fn is_connected(&self, player_id: PlayerId) -> bool;
}
