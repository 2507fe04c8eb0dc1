//! Movement use cases: walking through exits, teleporting, opening doors.

mod go;
mod open_exit;
mod teleport;

pub use go::Go;
pub use open_exit::OpenExit;
pub use teleport::Teleport;

use std::sync::Arc;

use mudlark_domain::{ConnectionId, RoomId};

use super::{Advisory, LookupError};
use crate::infrastructure::ports::RepoError;

/// Container for movement use cases.
pub struct MovementUseCases {
    pub go: Arc<Go>,
    pub teleport: Arc<Teleport>,
    pub open_exit: Arc<OpenExit>,
}

impl MovementUseCases {
    pub fn new(go: Arc<Go>, teleport: Arc<Teleport>, open_exit: Arc<OpenExit>) -> Self {
        Self {
            go,
            teleport,
            open_exit,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MovementError {
    #[error("Could not convert {0} to a number.")]
    NotANumber(String),
    #[error("No exit with index {0} is available in this room.")]
    NoSuchExit(usize),
    #[error("The {0} is closed.")]
    ExitClosed(String),
    #[error("The {0} is already open.")]
    AlreadyOpen(String),
    #[error("You need {0} to open this door.")]
    MissingItem(String),
    #[error("{0} is not a valid room ID")]
    InvalidRoomId(String),
    #[error("Room with id {0} does not exist.")]
    NoSuchRoom(RoomId),
    #[error("Could not find connection with id {0}.")]
    ConnectionNotFound(ConnectionId),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for MovementError {
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
