//! World entities.

pub mod connection;
pub mod item;
pub mod player;
pub mod room;

pub use connection::{RoomConnection, DOOR_NAME};
pub use item::{find_named, take_named, Item, ItemEffect};
pub use player::Player;
pub use room::{Room, EMPTY_ROOM_DESCRIPTION};

/// Case-insensitive exact name equality, used for items and players alike.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
