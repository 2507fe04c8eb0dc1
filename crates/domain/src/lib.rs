//! Pure world model and command language for the MUD.
//!
//! Nothing in this crate performs I/O. Storage, transport and sessions live in
//! the engine crate.

pub mod command;
pub mod entities;
pub mod error;
pub mod exits;
pub mod ids;
pub mod message;

pub use command::{lex, parse, Command, CommandError, Sentence, Verb};
pub use entities::{
    find_named, names_match, take_named, Item, ItemEffect, Player, Room, RoomConnection,
    DOOR_NAME, EMPTY_ROOM_DESCRIPTION,
};
pub use error::DomainError;
pub use exits::{ordered_exits, parse_exit_index, Exit};
pub use ids::{ConnectionId, PlayerId, RoomId, SessionId};
pub use message::Message;
