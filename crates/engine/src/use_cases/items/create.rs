//! Create item use case. Conjures a new item into the actor's room.

use std::sync::Arc;

use mudlark_domain::{Item, Message, PlayerId};

use super::ItemError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{load_actor, load_room, occupants, tell_others};
use crate::use_cases::LookupError;

pub struct CreateItem {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl CreateItem {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            rooms,
            locks,
        }
    }

    pub async fn execute(
        &self,
        actor_id: PlayerId,
        name: &str,
        description: &str,
    ) -> Result<Vec<Message>, ItemError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let room_id = actor.current_room_id.ok_or(LookupError::InVoid)?;

        let _guard = self.locks.lock(room_id).await;
        let mut room = load_room(self.rooms.as_ref(), room_id).await?;
        room.items.push(Item::new(name, description));
        self.rooms.save(&room).await?;

        let mut messages = vec![Message::to(
            actor.id,
            format!("<ACTION>You create <ITEM>{name}</ITEM>.</ACTION>"),
        )];
        messages.extend(tell_others(
            &actor,
            &occupants(self.players.as_ref(), room.id).await?,
            &format!("<INFO>{} created <ITEM>{name}</ITEM>.</INFO>", actor.name),
        ));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{bodies_for, TestWorld};

    #[tokio::test]
    async fn new_item_is_appended_to_the_room() {
        let world = TestWorld::new();
        let mut hall = world.room("Hall").await;
        hall.items.push(Item::new("Rope", "Ten feet."));
        world.save_room(&hall).await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;

        let messages = CreateItem::new(world.players(), world.rooms(), world.locks.clone())
            .execute(alice.id, "Lamp", "An old brass lamp.")
            .await
            .unwrap();

        let names: Vec<_> = world
            .reload_room(hall.id)
            .await
            .items
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Rope", "Lamp"]);
        assert_eq!(
            bodies_for(&messages, bob.id),
            vec!["<INFO>ALICE created <ITEM>Lamp</ITEM>.</INFO>"]
        );
    }
}
