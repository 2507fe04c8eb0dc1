//! Room entity - A place players can occupy
//!
//! Rooms are created by digging. Links to other rooms are not stored on the
//! room itself; they are separate [`RoomConnection`](super::RoomConnection)
//! entities so that each link can carry its own open/closed state.

use serde::{Deserialize, Serialize};

use crate::{Item, PlayerId, RoomId};

/// Description given to every freshly dug room.
pub const EMPTY_ROOM_DESCRIPTION: &str = "There is nothing in this room.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub creator_id: PlayerId,
    pub name: String,
    pub description: String,
    /// Display order is significant
    pub items: Vec<Item>,
}

impl Room {
    pub fn new(creator_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id: RoomId::new(),
            creator_id,
            name: name.into(),
            description: EMPTY_ROOM_DESCRIPTION.to_string(),
            items: Vec::new(),
        }
    }

    /// A freshly dug room named after a random placeholder number.
    pub fn dug_by(creator_id: PlayerId, placeholder: u32) -> Self {
        Self::new(creator_id, format!("Empty room #{placeholder}"))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_created_by(&self, player_id: PlayerId) -> bool {
        self.creator_id == player_id
    }

    /// Apply a partial edit. Fields passed as `None` are left unchanged.
    pub fn apply_changes(&mut self, name: Option<String>, description: Option<String>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dug_room_gets_placeholder_name_and_empty_description() {
        let creator = PlayerId::new();
        let room = Room::dug_by(creator, 42);
        assert_eq!(room.name, "Empty room #42");
        assert_eq!(room.description, EMPTY_ROOM_DESCRIPTION);
        assert!(room.is_created_by(creator));
        assert!(room.items.is_empty());
    }

    #[test]
    fn partial_changes_leave_other_fields_alone() {
        let mut room = Room::new(PlayerId::new(), "Hall");
        room.apply_changes(None, Some("A long hall.".into()));
        assert_eq!(room.name, "Hall");
        assert_eq!(room.description, "A long hall.");

        room.apply_changes(Some("Great Hall".into()), None);
        assert_eq!(room.name, "Great Hall");
        assert_eq!(room.description, "A long hall.");
    }
}
