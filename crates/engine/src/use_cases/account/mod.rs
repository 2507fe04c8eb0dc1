//! Account use cases: creating players, logging in and out.

mod create_user;
mod login;
mod logout;

pub use create_user::CreateUser;
pub use login::LoginUser;
pub use logout::Logout;

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::Advisory;
use crate::infrastructure::ports::RepoError;

/// Container for account use cases.
pub struct AccountUseCases {
    pub create_user: Arc<CreateUser>,
    pub login: Arc<LoginUser>,
    pub logout: Arc<Logout>,
}

impl AccountUseCases {
    pub fn new(create_user: Arc<CreateUser>, login: Arc<LoginUser>, logout: Arc<Logout>) -> Self {
        Self {
            create_user,
            login,
            logout,
        }
    }
}

/// Successful identification: the player the session should bind to, and
/// what to tell everyone about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub player_id: PlayerId,
    pub messages: Vec<Message>,
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Player name cannot be empty.")]
    InvalidName,
    #[error("Failed to log in")]
    LoginFailed,
    #[error("Could not find player with id {0}.")]
    PlayerNotFound(PlayerId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for AccountError {
    fn repo_error(&self) -> Option<&RepoError> {
        match self {
            Self::Repo(e) => Some(e),
            _ => None,
        }
    }

    /// Nobody is bound yet when an account command fails.
    fn to_origin(&self) -> bool {
        true
    }
}
