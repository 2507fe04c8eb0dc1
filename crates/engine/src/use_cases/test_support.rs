//! In-memory world fixture shared by use-case tests.

use std::sync::Arc;

use mudlark_domain::{Message, Player, PlayerId, Room, RoomConnection, RoomId};

use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::memory::MemoryWorld;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RoomRepo};

pub(crate) struct TestWorld {
    pub(crate) world: Arc<MemoryWorld>,
    pub(crate) locks: Arc<EntityLocks>,
}

impl TestWorld {
    pub(crate) fn new() -> Self {
        Self {
            world: Arc::new(MemoryWorld::new()),
            locks: Arc::new(EntityLocks::new()),
        }
    }

    pub(crate) fn players(&self) -> Arc<dyn PlayerRepo> {
        self.world.clone()
    }

    pub(crate) fn rooms(&self) -> Arc<dyn RoomRepo> {
        self.world.clone()
    }

    pub(crate) fn connections(&self) -> Arc<dyn ConnectionRepo> {
        self.world.clone()
    }

    pub(crate) async fn room(&self, name: &str) -> Room {
        self.room_by(PlayerId::new(), name).await
    }

    pub(crate) async fn room_by(&self, creator: PlayerId, name: &str) -> Room {
        let room = Room::new(creator, name);
        RoomRepo::save(self.world.as_ref(), &room).await.unwrap();
        room
    }

    /// An online player standing in `room_id`.
    pub(crate) async fn player_in(&self, name: &str, room_id: RoomId) -> Player {
        let player = Player::new(name).unwrap().with_room(room_id).online();
        self.save_player(&player).await;
        player
    }

    pub(crate) async fn save_player(&self, player: &Player) {
        PlayerRepo::save(self.world.as_ref(), player).await.unwrap();
    }

    pub(crate) async fn save_room(&self, room: &Room) {
        RoomRepo::save(self.world.as_ref(), room).await.unwrap();
    }

    pub(crate) async fn link(&self, creator: PlayerId, a: RoomId, b: RoomId) -> RoomConnection {
        let connection = RoomConnection::between(creator, a, b).unwrap();
        ConnectionRepo::save(self.world.as_ref(), &connection)
            .await
            .unwrap();
        connection
    }

    pub(crate) async fn player(&self, id: PlayerId) -> Player {
        PlayerRepo::get(self.world.as_ref(), id)
            .await
            .unwrap()
            .expect("player should exist")
    }

    pub(crate) async fn reload_room(&self, id: RoomId) -> Room {
        RoomRepo::get(self.world.as_ref(), id)
            .await
            .unwrap()
            .expect("room should exist")
    }
}

/// Bodies addressed to `player_id`, in order.
pub(crate) fn bodies_for(messages: &[Message], player_id: PlayerId) -> Vec<&str> {
    messages
        .iter()
        .filter(|m| m.is_for(player_id))
        .map(|m| m.body.as_str())
        .collect()
}
