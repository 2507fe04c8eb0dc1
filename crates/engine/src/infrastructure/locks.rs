//! Per-entity async locks.
//!
//! Every read-modify-write of a player, room or connection holds that
//! entity's lock for the whole sequence. Locks are taken in a fixed order:
//! the acting player, then its room, then a connection. No operation holds
//! two locks of the same kind.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Held for as long as the entity must not change under the holder.
pub type EntityGuard = OwnedMutexGuard<()>;

/// Registry of one mutex per entity id, created on first use.
#[derive(Default)]
pub struct EntityLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl EntityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, id: impl Into<Uuid>) -> EntityGuard {
        let mutex = self.locks.entry(id.into()).or_default().clone();
        mutex.lock_owned().await
    }

    /// Number of entities that have ever been locked.
    // TODO: prune entries whose mutex is unlocked and unshared once long-running
    // servers show the map growing without bound.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
