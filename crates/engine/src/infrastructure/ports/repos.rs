//! Repository port traits for world storage.
//!
//! Saves are upserts. Readers get owned copies; nothing here hands out
//! references into shared state.

use async_trait::async_trait;
use mudlark_domain::{ConnectionId, Player, PlayerId, Room, RoomConnection, RoomId};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepo: Send + Sync {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError>;
    async fn save(&self, player: &Player) -> Result<(), RepoError>;

    /// First player whose name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, RepoError>;

    /// Every player whose current room is `room_id`, online or not.
    async fn list_in_room(&self, room_id: RoomId) -> Result<Vec<Player>, RepoError>;
    async fn list_all(&self) -> Result<Vec<Player>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepo: Send + Sync {
    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepoError>;
    async fn save(&self, room: &Room) -> Result<(), RepoError>;
    async fn list_all(&self) -> Result<Vec<Room>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepo: Send + Sync {
    async fn get(&self, id: ConnectionId) -> Result<Option<RoomConnection>, RepoError>;
    async fn save(&self, connection: &RoomConnection) -> Result<(), RepoError>;

    /// Connections with `room_id` at either end, in no particular order.
    async fn list_for_room(&self, room_id: RoomId) -> Result<Vec<RoomConnection>, RepoError>;
}
