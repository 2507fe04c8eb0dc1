//! Drop item use case. The inverse of pickup.

use std::sync::Arc;

use mudlark_domain::{take_named, Message, PlayerId};

use super::ItemError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{load_actor, load_room, occupants, tell_others};
use crate::use_cases::LookupError;

pub struct DropItem {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl DropItem {
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

    pub async fn execute(&self, actor_id: PlayerId, name: &str) -> Result<Vec<Message>, ItemError> {
        let _actor_guard = self.locks.lock(actor_id).await;
        let original = load_actor(self.players.as_ref(), actor_id).await?;
        let room_id = original.current_room_id.ok_or(LookupError::InVoid)?;

        let mut actor = original.clone();
        let item = take_named(&mut actor.inventory, name)
            .ok_or_else(|| ItemError::NotCarried(name.to_string()))?;

        let _room_guard = self.locks.lock(room_id).await;
        let mut room = load_room(self.rooms.as_ref(), room_id).await?;

        self.players.save(&actor).await?;
        room.items.push(item.clone());
        if let Err(e) = self.rooms.save(&room).await {
            if let Err(restore) = self.players.save(&original).await {
                tracing::error!(
                    player_id = %actor_id,
                    error = %restore,
                    "Failed to restore inventory after drop failure"
                );
            }
            return Err(e.into());
        }

        let mut messages = vec![Message::to(
            actor.id,
            format!("<ACTION>You drop <ITEM>{}</ITEM>.</ACTION>", item.name),
        )];
        messages.extend(tell_others(
            &actor,
            &occupants(self.players.as_ref(), room_id).await?,
            &format!("<INFO>{} dropped <ITEM>{}</ITEM>.</INFO>", actor.name, item.name),
        ));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{bodies_for, TestWorld};
    use mudlark_domain::Item;

    fn drop_item(world: &TestWorld) -> DropItem {
        DropItem::new(world.players(), world.rooms(), world.locks.clone())
    }

    #[tokio::test]
    async fn dropped_item_lands_at_the_end_of_the_room_list() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await.with_item(Item::new("Rope", ""));
        world.save_room(&hall).await;
        let alice = world
            .player_in("ALICE", hall.id)
            .await
            .with_item(Item::new("Lamp", ""));
        world.save_player(&alice).await;
        let bob = world.player_in("BOB", hall.id).await;

        let messages = drop_item(&world).execute(alice.id, "lamp").await.unwrap();

        assert!(world.player(alice.id).await.inventory.is_empty());
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
            vec!["<INFO>ALICE dropped <ITEM>Lamp</ITEM>.</INFO>"]
        );
    }

    #[tokio::test]
    async fn dropping_something_not_carried_changes_nothing() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let alice = world
            .player_in("ALICE", hall.id)
            .await
            .with_item(Item::new("Lamp", ""));
        world.save_player(&alice).await;

        let err = drop_item(&world).execute(alice.id, "SWORD").await.unwrap_err();

        assert_eq!(err.to_string(), "You are not carrying SWORD.");
        assert_eq!(world.player(alice.id).await.inventory.len(), 1);
        assert!(world.reload_room(hall.id).await.items.is_empty());
    }
}
