//! Pickup item use case.
//!
//! Moves the first room item whose name matches into the actor's inventory.

use std::sync::Arc;

use mudlark_domain::{take_named, Message, PlayerId};

use super::ItemError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{load_actor, load_room, occupants, tell_others};
use crate::use_cases::LookupError;

pub struct PickupItem {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl PickupItem {
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
        let mut actor = load_actor(self.players.as_ref(), actor_id).await?;
        let room_id = actor.current_room_id.ok_or(LookupError::InVoid)?;

        let _room_guard = self.locks.lock(room_id).await;
        let original = load_room(self.rooms.as_ref(), room_id).await?;
        let mut room = original.clone();
        let item = take_named(&mut room.items, name)
            .ok_or_else(|| ItemError::NotInRoom(name.to_string()))?;

        self.rooms.save(&room).await?;
        actor.inventory.push(item.clone());
        if let Err(e) = self.players.save(&actor).await {
            if let Err(restore) = self.rooms.save(&original).await {
                tracing::error!(
                    room_id = %room_id,
                    error = %restore,
                    "Failed to restore room items after pickup failure"
                );
            }
            return Err(e.into());
        }

        let mut messages = vec![Message::to(
            actor.id,
            format!("<ACTION>You pick up <ITEM>{}</ITEM>.</ACTION>", item.name),
        )];
        messages.extend(tell_others(
            &actor,
            &occupants(self.players.as_ref(), room_id).await?,
            &format!("<INFO>{} picked up <ITEM>{}</ITEM>.</INFO>", actor.name, item.name),
        ));
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPlayerRepo, MockRoomRepo, RepoError};
    use crate::use_cases::test_support::{bodies_for, TestWorld};
    use mudlark_domain::{Item, Player, Room};
    use std::sync::Mutex;

    fn pickup(world: &TestWorld) -> PickupItem {
        PickupItem::new(world.players(), world.rooms(), world.locks.clone())
    }

    #[tokio::test]
    async fn moves_first_match_from_room_to_inventory() {
        let world = TestWorld::new();
        let hall = world
            .room("Hall")
            .await
            .with_item(Item::new("Lamp", "Brass."))
            .with_item(Item::new("Key", "Rusty."))
            .with_item(Item::new("lamp", "Tin."));
        world.save_room(&hall).await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;

        let messages = pickup(&world).execute(alice.id, "LAMP").await.unwrap();

        let carried = world.player(alice.id).await.inventory;
        assert_eq!(carried, vec![Item::new("Lamp", "Brass.")]);
        let left: Vec<_> = world
            .reload_room(hall.id)
            .await
            .items
            .into_iter()
            .map(|i| i.description)
            .collect();
        assert_eq!(left, vec!["Rusty.", "Tin."]);
        assert_eq!(
            bodies_for(&messages, bob.id),
            vec!["<INFO>ALICE picked up <ITEM>Lamp</ITEM>.</INFO>"]
        );
    }

    #[tokio::test]
    async fn missing_item_is_one_advisory_and_no_writes() {
        let world = TestWorld::new();
        let hall = world
            .room("Hall")
            .await
            .with_item(Item::new("Lamp", ""));
        world.save_room(&hall).await;
        let alice = world.player_in("ALICE", hall.id).await;

        let err = pickup(&world).execute(alice.id, "LAM").await.unwrap_err();

        assert_eq!(err.to_string(), "There is no LAM here.");
        assert_eq!(world.reload_room(hall.id).await.items.len(), 1);
        assert!(world.player(alice.id).await.inventory.is_empty());
    }

    #[tokio::test]
    async fn failed_inventory_save_restores_the_room() {
        let creator = Player::new("ALICE").unwrap();
        let room = Room::new(creator.id, "Hall").with_item(Item::new("Lamp", ""));
        let actor = creator.with_room(room.id).online();
        let saved_rooms: Arc<Mutex<Vec<Room>>> = Arc::default();

        let mut players = MockPlayerRepo::new();
        let actor_copy = actor.clone();
        players
            .expect_get()
            .returning(move |_| Ok(Some(actor_copy.clone())));
        players
            .expect_save()
            .returning(|_| Err(RepoError::database("save_player", "io")));

        let mut rooms = MockRoomRepo::new();
        let room_copy = room.clone();
        rooms
            .expect_get()
            .returning(move |_| Ok(Some(room_copy.clone())));
        let recorder = saved_rooms.clone();
        rooms.expect_save().times(2).returning(move |r| {
            recorder.lock().unwrap().push(r.clone());
            Ok(())
        });

        let result = PickupItem::new(Arc::new(players), Arc::new(rooms), Arc::new(EntityLocks::new()))
            .execute(actor.id, "lamp")
            .await;

        assert!(matches!(result, Err(ItemError::Repo(_))));
        let saved = saved_rooms.lock().unwrap();
        assert!(saved[0].items.is_empty());
        assert_eq!(saved[1], room);
    }
}
