//! RoomConnection entity - A link between two rooms
//!
//! Not to be confused with a network connection. A room connection joins an
//! unordered pair of distinct rooms and can be turned into a door: closed, and
//! optionally requiring an item to open.

use serde::{Deserialize, Serialize};

use crate::{ConnectionId, DomainError, Item, PlayerId, RoomId};

/// Name a connection takes once it is made into a door.
pub const DOOR_NAME: &str = "Door";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConnection {
    pub id: ConnectionId,
    pub creator_id: PlayerId,
    pub name: String,
    pub is_open: bool,
    pub required_item_to_open: Option<String>,
    room1_id: RoomId,
    room2_id: RoomId,
}

impl RoomConnection {
    /// Create an open, unnamed connection between two distinct rooms.
    pub fn between(creator_id: PlayerId, room1_id: RoomId, room2_id: RoomId) -> Result<Self, DomainError> {
        if room1_id == room2_id {
            return Err(DomainError::constraint(format!(
                "A connection must join two distinct rooms, got {room1_id} twice"
            )));
        }
        Ok(Self {
            id: ConnectionId::new(),
            creator_id,
            name: String::new(),
            is_open: true,
            required_item_to_open: None,
            room1_id,
            room2_id,
        })
    }

    pub fn rooms(&self) -> (RoomId, RoomId) {
        (self.room1_id, self.room2_id)
    }

    pub fn touches(&self, room_id: RoomId) -> bool {
        self.room1_id == room_id || self.room2_id == room_id
    }

    /// The endpoint opposite `room_id`, or `None` if `room_id` is not an endpoint.
    pub fn other_room_id(&self, room_id: RoomId) -> Option<RoomId> {
        if self.room1_id == room_id {
            Some(self.room2_id)
        } else if self.room2_id == room_id {
            Some(self.room1_id)
        } else {
            None
        }
    }

    /// Name used in player-facing text.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "passage"
        } else {
            &self.name
        }
    }

    pub fn make_door(&mut self, required_item_to_open: Option<String>) {
        self.name = DOOR_NAME.to_string();
        self.is_open = false;
        self.required_item_to_open = required_item_to_open;
    }

    /// Whether someone carrying `inventory` may open this connection.
    pub fn can_be_opened_with(&self, inventory: &[Item]) -> bool {
        match &self.required_item_to_open {
            Some(required) => super::item::find_named(inventory, required).is_some(),
            None => true,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }
}
