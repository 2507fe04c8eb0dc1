//! Item use cases.
//!
//! Items move by value between a room's item list and a player's inventory.
//! Both sides are locked (player first, then room) for the whole move.

mod create;
mod drop_item;
mod inventory;
mod pickup;

pub use create::CreateItem;
pub use drop_item::DropItem;
pub use inventory::ShowInventory;
pub use pickup::PickupItem;

use std::sync::Arc;

use super::{Advisory, LookupError};
use crate::infrastructure::ports::RepoError;

/// Container for item use cases.
pub struct ItemUseCases {
    pub create: Arc<CreateItem>,
    pub pickup: Arc<PickupItem>,
    pub drop: Arc<DropItem>,
    pub inventory: Arc<ShowInventory>,
}

impl ItemUseCases {
    pub fn new(
        create: Arc<CreateItem>,
        pickup: Arc<PickupItem>,
        drop: Arc<DropItem>,
        inventory: Arc<ShowInventory>,
    ) -> Self {
        Self {
            create,
            pickup,
            drop,
            inventory,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("There is no {0} here.")]
    NotInRoom(String),
    #[error("You are not carrying {0}.")]
    NotCarried(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for ItemError {
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
