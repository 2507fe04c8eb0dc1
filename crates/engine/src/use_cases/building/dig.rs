//! Dig use case.
//!
//! Creates a room owned by the actor and moves them into it. When the actor
//! was standing somewhere, the old and new rooms are joined by an open
//! connection. Writes go room, then connection, then player, so a failure
//! part way never leaves a connection pointing at an unsaved room.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId, Room, RoomConnection};

use super::BuildError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RandomPort, RoomRepo};
use crate::use_cases::presence::{load_actor, occupants, room_leave_messages};

/// Upper bound of the number in a new room's placeholder name.
const PLACEHOLDER_MAX: u32 = 1000;

pub struct Dig {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    connections: Arc<dyn ConnectionRepo>,
    random: Arc<dyn RandomPort>,
    locks: Arc<EntityLocks>,
}

impl Dig {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        connections: Arc<dyn ConnectionRepo>,
        random: Arc<dyn RandomPort>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            rooms,
            connections,
            random,
            locks,
        }
    }

    pub async fn execute(&self, actor_id: PlayerId) -> Result<Vec<Message>, BuildError> {
        let _actor_guard = self.locks.lock(actor_id).await;
        let mut actor = load_actor(self.players.as_ref(), actor_id).await?;

        let _room_guard = match actor.current_room_id {
            Some(room_id) => Some(self.locks.lock(room_id).await),
            None => None,
        };
        let source = match actor.current_room_id {
            Some(room_id) => {
                let room = self.rooms.get(room_id).await?;
                if room.is_none() {
                    tracing::warn!(player_id = %actor.id, room_id = %room_id, "Digging from a room that no longer exists");
                }
                room
            }
            None => None,
        };

        let room = Room::dug_by(actor.id, self.random.gen_range(0, PLACEHOLDER_MAX));
        self.rooms.save(&room).await?;

        let mut messages = vec![Message::to(
            actor.id,
            format!(
                "<ACTION>Successfully created new room {}. You have been teleported into the new room.</ACTION>",
                room.name
            ),
        )];

        if let Some(source) = &source {
            let connection = RoomConnection::between(actor.id, source.id, room.id)?;
            self.connections.save(&connection).await?;
        }

        actor.current_room_id = Some(room.id);
        self.players.save(&actor).await?;

        tracing::info!(player_id = %actor.id, room_id = %room.id, "Room dug");

        if let Some(source) = &source {
            let left_behind = occupants(self.players.as_ref(), source.id).await?;
            messages.extend(room_leave_messages(&actor, &left_behind));
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockConnectionRepo, MockRoomRepo, RepoError};
    use crate::infrastructure::random::FixedRandom;
    use crate::use_cases::test_support::{bodies_for, TestWorld};
    use mudlark_domain::{Player, EMPTY_ROOM_DESCRIPTION};

    fn dig(world: &TestWorld) -> Dig {
        Dig::new(
            world.players(),
            world.rooms(),
            world.connections(),
            Arc::new(FixedRandom(42)),
            world.locks.clone(),
        )
    }

    #[tokio::test]
    async fn dig_from_the_void_creates_room_without_connection() {
        let world = TestWorld::new();
        let drifter = Player::new("DRIFTER").unwrap().online();
        world.save_player(&drifter).await;

        let messages = dig(&world).execute(drifter.id).await.unwrap();

        let moved = world.player(drifter.id).await;
        let room = world.reload_room(moved.current_room_id.unwrap()).await;
        assert_eq!(room.name, "Empty room #42");
        assert_eq!(room.description, EMPTY_ROOM_DESCRIPTION);
        assert!(room.is_created_by(drifter.id));
        assert!(ConnectionRepo::list_for_room(world.world.as_ref(), room.id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            messages,
            vec![Message::to(
                drifter.id,
                "<ACTION>Successfully created new room Empty room #42. You have been teleported into the new room.</ACTION>"
            )]
        );
    }

    #[tokio::test]
    async fn dig_from_a_room_links_it_and_tells_those_left_behind() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;

        let messages = dig(&world).execute(alice.id).await.unwrap();

        let new_room = world.player(alice.id).await.current_room_id.unwrap();
        let links = ConnectionRepo::list_for_room(world.world.as_ref(), hall.id)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].other_room_id(hall.id), Some(new_room));
        assert!(links[0].is_open);
        assert_eq!(links[0].creator_id, alice.id);
        assert_eq!(
            bodies_for(&messages, bob.id),
            vec!["<INFO>ALICE left the room.</INFO>"]
        );
    }

    #[tokio::test]
    async fn failed_room_save_writes_nothing_else() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let alice = world.player_in("ALICE", hall.id).await;
        let hall_copy = hall.clone();

        let mut rooms = MockRoomRepo::new();
        rooms
            .expect_get()
            .returning(move |_| Ok(Some(hall_copy.clone())));
        rooms
            .expect_save()
            .returning(|_| Err(RepoError::database("save_room", "locked")));
        let mut connections = MockConnectionRepo::new();
        connections.expect_save().never();

        let result = Dig::new(
            world.players(),
            Arc::new(rooms),
            Arc::new(connections),
            Arc::new(FixedRandom(1)),
            world.locks.clone(),
        )
        .execute(alice.id)
        .await;

        assert!(matches!(result, Err(BuildError::Repo(_))));
        assert!(world.player(alice.id).await.is_in(hall.id));
    }
}
