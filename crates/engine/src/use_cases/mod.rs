//! Use cases - game actions.
//!
//! Each module contains the use cases for one family of verbs. Every use case
//! returns the list of addressed [`Message`](mudlark_domain::Message)s its
//! action produces, or an error that the interpreter turns into exactly one
//! advisory.

pub mod account;
pub mod building;
pub mod chat;
pub mod items;
pub mod look;
pub mod movement;
mod presence;

#[cfg(test)]
pub(crate) mod test_support;

pub use account::{AccountError, AccountUseCases, Authenticated};
pub use building::{BuildError, BuildingUseCases};
pub use chat::{ChatError, ChatUseCases};
pub use items::{ItemError, ItemUseCases};
pub use look::{LookError, LookUseCases};
pub use movement::{MovementError, MovementUseCases};
pub use presence::{room_enter_messages, room_leave_messages};

use mudlark_domain::{PlayerId, RoomId};

use crate::infrastructure::ports::RepoError;

/// How a use-case failure is reported back to the player.
pub trait Advisory: std::error::Error {
    /// The underlying storage failure, if this is one. Storage failures are
    /// logged and reported generically.
    fn repo_error(&self) -> Option<&RepoError>;

    /// Whether the advisory goes to the originating connection instead of
    /// the acting player, e.g. because the actor could not be loaded.
    fn to_origin(&self) -> bool {
        false
    }
}

/// Failures resolving the actor and where they stand. Shared by every
/// family that acts inside a room.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Could not find player with id {0}.")]
    ActorNotFound(PlayerId),
    #[error("You are in the void. Use @DIG to create a room first.")]
    InVoid,
    #[error("Could not find room with id {0}.")]
    RoomNotFound(RoomId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for LookupError {
    fn repo_error(&self) -> Option<&RepoError> {
        match self {
            Self::Repo(e) => Some(e),
            _ => None,
        }
    }

    fn to_origin(&self) -> bool {
        matches!(self, Self::ActorNotFound(_))
    }
}
