//! Make door use case.
//!
//! Turns one of the current room's exits into a closed door, optionally
//! locked by an item. Only the connection's creator may do this.

use std::sync::Arc;

use mudlark_domain::{parse_exit_index, Message, PlayerId};

use super::BuildError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo};
use crate::use_cases::presence::{exits_from, load_actor, occupants, tell_others};
use crate::use_cases::LookupError;

pub struct MakeDoor {
    players: Arc<dyn PlayerRepo>,
    connections: Arc<dyn ConnectionRepo>,
    locks: Arc<EntityLocks>,
}

impl MakeDoor {
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

    pub async fn execute(
        &self,
        actor_id: PlayerId,
        exit: &str,
        required_item: Option<&str>,
    ) -> Result<Vec<Message>, BuildError> {
        let index =
            parse_exit_index(exit).ok_or_else(|| BuildError::NotANumber(exit.to_string()))?;

        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let here = actor.current_room_id.ok_or(LookupError::InVoid)?;
        let exit = exits_from(self.connections.as_ref(), here)
            .await?
            .into_iter()
            .nth(index)
            .ok_or(BuildError::NoSuchExit(index))?;

        let _guard = self.locks.lock(exit.connection.id).await;
        let mut connection = self
            .connections
            .get(exit.connection.id)
            .await?
            .ok_or(BuildError::ConnectionNotFound(exit.connection.id))?;
        if connection.creator_id != actor.id {
            return Err(BuildError::NotConnectionCreator);
        }

        connection.make_door(required_item.map(str::to_string));
        self.connections.save(&connection).await?;
        tracing::debug!(player_id = %actor.id, connection_id = %connection.id, "Door made");

        let mut messages = vec![Message::to(
            actor.id,
            "<ACTION>Connection is now a door.</ACTION>",
        )];
        messages.extend(tell_others(
            &actor,
            &occupants(self.players.as_ref(), here).await?,
            &format!("<INFO>{} turned an exit into a door.</INFO>", actor.name),
        ));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{bodies_for, TestWorld};

    #[tokio::test]
    async fn creator_makes_a_locked_door() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let vault = world.room("Vault").await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;
        let link = world.link(alice.id, hall.id, vault.id).await;

        let messages = MakeDoor::new(world.players(), world.connections(), world.locks.clone())
            .execute(alice.id, "0", Some("Brass Key"))
            .await
            .unwrap();

        let door = ConnectionRepo::get(world.world.as_ref(), link.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(door.name, "Door");
        assert!(!door.is_open);
        assert_eq!(door.required_item_to_open.as_deref(), Some("Brass Key"));
        assert_eq!(
            bodies_for(&messages, alice.id),
            vec!["<ACTION>Connection is now a door.</ACTION>"]
        );
        assert_eq!(bodies_for(&messages, bob.id).len(), 1);
    }

    #[tokio::test]
    async fn only_the_connection_creator_may_make_a_door() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let vault = world.room("Vault").await;
        let bob = world.player_in("BOB", hall.id).await;
        let link = world.link(PlayerId::new(), hall.id, vault.id).await;

        let err = MakeDoor::new(world.players(), world.connections(), world.locks.clone())
            .execute(bob.id, "0", None)
            .await
            .unwrap_err();

        assert!(matches!(err, BuildError::NotConnectionCreator));
        let untouched = ConnectionRepo::get(world.world.as_ref(), link.id)
            .await
            .unwrap()
            .unwrap();
        assert!(untouched.is_open);
    }
}
