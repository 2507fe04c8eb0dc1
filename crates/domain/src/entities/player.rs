//! Player entity - A person's character in the world
//!
//! A player is created by `CREATEUSER`, goes online on login, and goes offline
//! when its last session disconnects. A player without a current room is in
//! the void until it digs or teleports somewhere.

use serde::{Deserialize, Serialize};

use crate::{DomainError, Item, PlayerId, RoomId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// `None` means the player is in the void
    pub current_room_id: Option<RoomId>,
    pub is_online: bool,
    /// Insertion order is display order
    pub inventory: Vec<Item>,
}

impl Player {
    /// Create an offline player in the void with an empty inventory.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        Ok(Self {
            id: PlayerId::new(),
            name,
            current_room_id: None,
            is_online: false,
            inventory: Vec::new(),
        })
    }

    pub fn with_room(mut self, room_id: RoomId) -> Self {
        self.current_room_id = Some(room_id);
        self
    }

    pub fn online(mut self) -> Self {
        self.is_online = true;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }

    pub fn is_in(&self, room_id: RoomId) -> bool {
        self.current_room_id == Some(room_id)
    }

    /// Whether this player counts as an occupant of `room_id`.
    pub fn is_occupant_of(&self, room_id: RoomId) -> bool {
        self.is_online && self.is_in(room_id)
    }

    pub fn is_named(&self, name: &str) -> bool {
        super::names_match(&self.name, name)
    }

    pub fn carries(&self, item_name: &str) -> bool {
        super::item::find_named(&self.inventory, item_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_offline_in_the_void() {
        let player = Player::new("Alice").unwrap();
        assert_eq!(player.name, "Alice");
        assert!(player.current_room_id.is_none());
        assert!(!player.is_online);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            Player::new("   "),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn occupant_requires_online_and_same_room() {
        let room = RoomId::new();
        let offline = Player::new("Bob").unwrap().with_room(room);
        assert!(offline.is_in(room));
        assert!(!offline.is_occupant_of(room));
        assert!(offline.clone().online().is_occupant_of(room));
        assert!(!offline.online().is_occupant_of(RoomId::new()));
    }

    #[test]
    fn carries_matches_ignoring_case() {
        let player = Player::new("Carol")
            .unwrap()
            .with_item(Item::new("Silver Key", "Shiny."));
        assert!(player.carries("silver key"));
        assert!(!player.carries("silver"));
    }
}
