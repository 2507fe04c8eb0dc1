//! Open exit use case. Opens a closed connection, if the actor carries
//! whatever item it requires.

use std::sync::Arc;

use mudlark_domain::{parse_exit_index, Message, PlayerId};

use super::MovementError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo};
use crate::use_cases::presence::{exits_from, load_actor, occupants, tell_others};
use crate::use_cases::LookupError;

pub struct OpenExit {
    players: Arc<dyn PlayerRepo>,
    connections: Arc<dyn ConnectionRepo>,
    locks: Arc<EntityLocks>,
}

impl OpenExit {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        connections: Arc<dyn ConnectionRepo>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            connections,
            locks,
        }
    }

    pub async fn execute(&self, actor_id: PlayerId, exit: &str) -> Result<Vec<Message>, MovementError> {
        let index =
            parse_exit_index(exit).ok_or_else(|| MovementError::NotANumber(exit.to_string()))?;

        let _actor_guard = self.locks.lock(actor_id).await;
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let here = actor.current_room_id.ok_or(LookupError::InVoid)?;

        let exit = exits_from(self.connections.as_ref(), here)
            .await?
            .into_iter()
            .nth(index)
            .ok_or(MovementError::NoSuchExit(index))?;

        let _connection_guard = self.locks.lock(exit.connection.id).await;
        let mut connection = self
            .connections
            .get(exit.connection.id)
            .await?
            .ok_or(MovementError::ConnectionNotFound(exit.connection.id))?;

        let name = connection.display_name().to_string();
        if connection.is_open {
            return Err(MovementError::AlreadyOpen(name));
        }
        if !connection.can_be_opened_with(&actor.inventory) {
            return Err(MovementError::MissingItem(
                connection.required_item_to_open.clone().unwrap_or_default(),
            ));
        }

        connection.open();
        self.connections.save(&connection).await?;
        tracing::debug!(player_id = %actor.id, connection_id = %connection.id, "Connection opened");

        let mut messages = vec![Message::to(
            actor.id,
            format!("<ACTION>You open the {name}.</ACTION>"),
        )];
        messages.extend(tell_others(
            &actor,
            &occupants(self.players.as_ref(), here).await?,
            &format!("<INFO>{} opened the {name}.</INFO>", actor.name),
        ));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{bodies_for, TestWorld};
    use mudlark_domain::{Item, RoomConnection};

    async fn door(world: &TestWorld, required: Option<&str>) -> (PlayerId, PlayerId, RoomConnection) {
        let hall = world.room("Hall").await;
        let vault = world.room("Vault").await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;
        let mut connection = world.link(alice.id, hall.id, vault.id).await;
        connection.make_door(required.map(str::to_string));
        ConnectionRepo::save(world.world.as_ref(), &connection)
            .await
            .unwrap();
        (alice.id, bob.id, connection)
    }

    fn open_exit(world: &TestWorld) -> OpenExit {
        OpenExit::new(world.players(), world.connections(), world.locks.clone())
    }

    async fn reload(world: &TestWorld, connection: &RoomConnection) -> RoomConnection {
        ConnectionRepo::get(world.world.as_ref(), connection.id)
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn opens_unlocked_door_and_tells_the_room() {
        let world = TestWorld::new();
        let (alice, bob, connection) = door(&world, None).await;

        let messages = open_exit(&world).execute(alice, "0").await.unwrap();

        assert!(reload(&world, &connection).await.is_open);
        assert_eq!(
            bodies_for(&messages, alice),
            vec!["<ACTION>You open the Door.</ACTION>"]
        );
        assert_eq!(
            bodies_for(&messages, bob),
            vec!["<INFO>ALICE opened the Door.</INFO>"]
        );
    }

    #[tokio::test]
    async fn locked_door_needs_the_item() {
        let world = TestWorld::new();
        let (alice, _, connection) = door(&world, Some("Brass Key")).await;

        let err = open_exit(&world).execute(alice, "0").await.unwrap_err();
        assert_eq!(err.to_string(), "You need Brass Key to open this door.");
        assert!(!reload(&world, &connection).await.is_open);

        let holder = world.player(alice).await.with_item(Item::new("brass key", ""));
        world.save_player(&holder).await;

        open_exit(&world).execute(alice, "0").await.unwrap();
        assert!(reload(&world, &connection).await.is_open);
    }

    #[tokio::test]
    async fn open_exit_is_a_no_op_advisory() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let garden = world.room("Garden").await;
        let alice = world.player_in("ALICE", hall.id).await;
        world.link(alice.id, hall.id, garden.id).await;

        let err = open_exit(&world).execute(alice.id, "0").await.unwrap_err();

        assert!(matches!(err, MovementError::AlreadyOpen(ref name) if name == "passage"));
    }
}
