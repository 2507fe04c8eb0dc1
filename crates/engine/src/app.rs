//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::StorageConfig,
    locks::EntityLocks,
    memory::MemoryWorld,
    ports::{ConnectionRepo, PlayerRepo, RandomPort, RepoError, RoomRepo},
    random::SystemRandom,
    sqlite::SqliteWorld,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the world storage ports and every use case.
/// Shared with the WebSocket and HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// World storage. Port traits are injected directly into use cases.
#[derive(Clone)]
pub struct Repositories {
    pub players: Arc<dyn PlayerRepo>,
    pub rooms: Arc<dyn RoomRepo>,
    pub connections: Arc<dyn ConnectionRepo>,
}

impl Repositories {
    /// Non-persistent world, lost on restart.
    pub fn memory() -> Self {
        let world = Arc::new(MemoryWorld::new());
        Self {
            players: world.clone(),
            rooms: world.clone(),
            connections: world,
        }
    }

    pub async fn sqlite(path: &str) -> Result<Self, RepoError> {
        let world = Arc::new(SqliteWorld::new(path).await?);
        Ok(Self {
            players: world.clone(),
            rooms: world.clone(),
            connections: world,
        })
    }

    /// Open the configured storage with every player offline. Nobody has a
    /// session yet, so online flags left by a previous run are stale.
    pub async fn open(storage: &StorageConfig) -> Result<Self, RepoError> {
        let repositories = match storage {
            StorageConfig::Memory => Self::memory(),
            StorageConfig::Sqlite { path } => Self::sqlite(path).await?,
        };
        let reset = repositories.mark_all_offline().await?;
        if reset > 0 {
            tracing::info!(players = reset, "Marked players from the previous run offline");
        }
        Ok(repositories)
    }

    /// Returns how many players were online.
    async fn mark_all_offline(&self) -> Result<usize, RepoError> {
        let mut reset = 0;
        for mut player in self.players.list_all().await? {
            if player.is_online {
                player.is_online = false;
                self.players.save(&player).await?;
                reset += 1;
            }
        }
        Ok(reset)
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub account: use_cases::AccountUseCases,
    pub movement: use_cases::MovementUseCases,
    pub building: use_cases::BuildingUseCases,
    pub chat: use_cases::ChatUseCases,
    pub items: use_cases::ItemUseCases,
    pub look: use_cases::LookUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories) -> Self {
        Self::with_random(repositories, Arc::new(SystemRandom))
    }

    /// Like [`App::new`] with an injected random source, for tests.
    pub fn with_random(repositories: Repositories, random: Arc<dyn RandomPort>) -> Self {
        let locks = Arc::new(EntityLocks::new());
        let repos = &repositories;

        let account = use_cases::AccountUseCases::new(
            Arc::new(use_cases::account::CreateUser::new(repos.players.clone())),
            Arc::new(use_cases::account::LoginUser::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::account::Logout::new(
                repos.players.clone(),
                locks.clone(),
            )),
        );

        let movement = use_cases::MovementUseCases::new(
            Arc::new(use_cases::movement::Go::new(
                repos.players.clone(),
                repos.rooms.clone(),
                repos.connections.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::movement::Teleport::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::movement::OpenExit::new(
                repos.players.clone(),
                repos.connections.clone(),
                locks.clone(),
            )),
        );

        let building = use_cases::BuildingUseCases::new(
            Arc::new(use_cases::building::Dig::new(
                repos.players.clone(),
                repos.rooms.clone(),
                repos.connections.clone(),
                random,
                locks.clone(),
            )),
            Arc::new(use_cases::building::ChangeRoom::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::building::MakeDoor::new(
                repos.players.clone(),
                repos.connections.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::building::RoomData::new(
                repos.players.clone(),
                repos.rooms.clone(),
                repos.connections.clone(),
            )),
        );

        let chat = use_cases::ChatUseCases::new(
            Arc::new(use_cases::chat::Say::new(repos.players.clone())),
            Arc::new(use_cases::chat::Whisper::new(repos.players.clone())),
        );

        let items = use_cases::ItemUseCases::new(
            Arc::new(use_cases::items::CreateItem::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::items::PickupItem::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::items::DropItem::new(
                repos.players.clone(),
                repos.rooms.clone(),
                locks.clone(),
            )),
            Arc::new(use_cases::items::ShowInventory::new(repos.players.clone())),
        );

        let look = use_cases::LookUseCases::new(
            Arc::new(use_cases::look::DescribeRoom::new(
                repos.players.clone(),
                repos.rooms.clone(),
                repos.connections.clone(),
            )),
            Arc::new(use_cases::look::LookAt::new(
                repos.players.clone(),
                repos.rooms.clone(),
            )),
        );

        Self {
            use_cases: UseCases {
                account,
                movement,
                building,
                chat,
                items,
                look,
            },
            repositories,
        }
    }
}
