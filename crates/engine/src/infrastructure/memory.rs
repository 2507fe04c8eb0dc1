//! In-process world storage.
//!
//! Backs the `memory` database URL and the flow tests. Entities are stored by
//! value; every read hands out a clone.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use mudlark_domain::{ConnectionId, Player, PlayerId, Room, RoomConnection, RoomId};

use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RepoError, RoomRepo};

/// A stored value plus the sequence number of its first save, so listings
/// come back in creation order.
struct Slot<T> {
    created: u64,
    value: T,
}

struct Table<K, T> {
    rows: DashMap<K, Slot<T>>,
    sequence: AtomicU64,
}

impl<K, T> Table<K, T>
where
    K: std::hash::Hash + Eq,
    T: Clone,
{
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }

    fn get(&self, key: &K) -> Option<T> {
        self.rows.get(key).map(|slot| slot.value.clone())
    }

    fn upsert(&self, key: K, value: T) {
        match self.rows.entry(key) {
            Entry::Occupied(mut slot) => slot.get_mut().value = value,
            Entry::Vacant(slot) => {
                let created = self.sequence.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot { created, value });
            }
        }
    }

    fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut matches: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|slot| predicate(&slot.value))
            .map(|slot| (slot.created, slot.value.clone()))
            .collect();
        matches.sort_by_key(|(created, _)| *created);
        matches.into_iter().map(|(_, value)| value).collect()
    }
}

/// All three repositories over one set of in-memory tables.
pub struct MemoryWorld {
    players: Table<PlayerId, Player>,
    rooms: Table<RoomId, Room>,
    connections: Table<ConnectionId, RoomConnection>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self {
            players: Table::new(),
            rooms: Table::new(),
            connections: Table::new(),
        }
    }
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerRepo for MemoryWorld {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.players.get(&id))
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        self.players.upsert(player.id, player.clone());
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        Ok(self
            .players
            .select(|player| player.name == name)
            .into_iter()
            .next())
    }

    async fn list_in_room(&self, room_id: RoomId) -> Result<Vec<Player>, RepoError> {
        Ok(self.players.select(|player| player.is_in(room_id)))
    }

    async fn list_all(&self) -> Result<Vec<Player>, RepoError> {
        Ok(self.players.select(|_| true))
    }
}

#[async_trait]
impl RoomRepo for MemoryWorld {
    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepoError> {
        Ok(self.rooms.get(&id))
    }

    async fn save(&self, room: &Room) -> Result<(), RepoError> {
        self.rooms.upsert(room.id, room.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Room>, RepoError> {
        Ok(self.rooms.select(|_| true))
    }
}

#[async_trait]
impl ConnectionRepo for MemoryWorld {
    async fn get(&self, id: ConnectionId) -> Result<Option<RoomConnection>, RepoError> {
        Ok(self.connections.get(&id))
    }

    async fn save(&self, connection: &RoomConnection) -> Result<(), RepoError> {
        self.connections.upsert(connection.id, connection.clone());
        Ok(())
    }

    async fn list_for_room(&self, room_id: RoomId) -> Result<Vec<RoomConnection>, RepoError> {
        Ok(self.connections.select(|connection| connection.touches(room_id)))
    }
}
