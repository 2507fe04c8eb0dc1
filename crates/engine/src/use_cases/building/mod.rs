//! Building use cases: digging rooms, editing them, and making doors.

mod change_room;
mod dig;
mod make_door;
mod room_data;

pub use change_room::ChangeRoom;
pub use dig::Dig;
pub use make_door::MakeDoor;
pub use room_data::RoomData;

use std::sync::Arc;

use mudlark_domain::{ConnectionId, DomainError};

use super::{Advisory, LookupError};
use crate::infrastructure::ports::RepoError;

/// Container for building use cases.
pub struct BuildingUseCases {
    pub dig: Arc<Dig>,
    pub change_room: Arc<ChangeRoom>,
    pub make_door: Arc<MakeDoor>,
    pub room_data: Arc<RoomData>,
}

impl BuildingUseCases {
    pub fn new(
        dig: Arc<Dig>,
        change_room: Arc<ChangeRoom>,
        make_door: Arc<MakeDoor>,
        room_data: Arc<RoomData>,
    ) -> Self {
        Self {
            dig,
            change_room,
            make_door,
            room_data,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("No new name or description received. Room remains unchanged.")]
    NothingToChange,
    #[error("Only the room's creator can change it.")]
    NotRoomCreator,
    #[error("Only the creator of the connection can change it.")]
    NotConnectionCreator,
    #[error("Could not convert {0} to a number.")]
    NotANumber(String),
    #[error("No exit with index {0} is available in this room.")]
    NoSuchExit(usize),
    #[error("Could not find connection with id {0}.")]
    ConnectionNotFound(ConnectionId),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for BuildError {
    fn repo_error(&self) -> Option<&RepoError> {
        match self {
            Self::Repo(e) => Some(e),
            Self::Lookup(e) => e.repo_error(),
            _ => None,
        }
    }

    fn to_origin(&self) -> bool {
        matches!(self, Self::Lookup(e) if e.to_origin())
    }
}
