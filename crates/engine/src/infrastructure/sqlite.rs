//! SQLite-backed world storage.
//!
//! Each entity is stored as a JSON document next to the columns the port
//! queries filter on. Listings come back in insertion (rowid) order.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use mudlark_domain::{ConnectionId, Player, PlayerId, Room, RoomConnection, RoomId};

use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RepoError, RoomRepo};

/// SQLite implementation of all three world repositories.
pub struct SqliteWorld {
    pool: SqlitePool,
}

impl SqliteWorld {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        for statement in [
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                current_room_id TEXT,
                data TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS players_by_room ON players (current_room_id)",
            "CREATE INDEX IF NOT EXISTS players_by_name ON players (name)",
            r#"
            CREATE TABLE IF NOT EXISTS rooms (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS connections (
                id TEXT PRIMARY KEY,
                room1_id TEXT NOT NULL,
                room2_id TEXT NOT NULL,
                data TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS connections_by_room1 ON connections (room1_id)",
            "CREATE INDEX IF NOT EXISTS connections_by_room2 ON connections (room2_id)",
        ] {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::database("schema", e))?;
        }

        Ok(Self { pool })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, RepoError> {
    serde_json::to_string(value).map_err(RepoError::serialization)
}

fn from_row<T: DeserializeOwned>(row: &SqliteRow) -> Result<T, RepoError> {
    let json: String = row.get("data");
    serde_json::from_str(&json).map_err(RepoError::serialization)
}

fn from_rows<T: DeserializeOwned>(rows: &[SqliteRow]) -> Result<Vec<T>, RepoError> {
    rows.iter().map(from_row).collect()
}

#[async_trait]
impl PlayerRepo for SqliteWorld {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT data FROM players WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_player", e))?;
        row.as_ref().map(from_row).transpose()
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO players (id, name, current_room_id, data)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                current_room_id = excluded.current_room_id,
                data = excluded.data
            "#,
        )
        .bind(player.id.to_string())
        .bind(player.name.as_str())
        .bind(player.current_room_id.map(|id| id.to_string()))
        .bind(to_json(player)?)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_player", e))?;
        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Player>, RepoError> {
        let row = sqlx::query("SELECT data FROM players WHERE name = ? ORDER BY rowid LIMIT 1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("find_player_by_name", e))?;
        row.as_ref().map(from_row).transpose()
    }

    async fn list_in_room(&self, room_id: RoomId) -> Result<Vec<Player>, RepoError> {
        let rows =
            sqlx::query("SELECT data FROM players WHERE current_room_id = ? ORDER BY rowid")
                .bind(room_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::database("list_players_in_room", e))?;
        from_rows(&rows)
    }

    async fn list_all(&self) -> Result<Vec<Player>, RepoError> {
        let rows = sqlx::query("SELECT data FROM players ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_players", e))?;
        from_rows(&rows)
    }
}

#[async_trait]
impl RoomRepo for SqliteWorld {
    async fn get(&self, id: RoomId) -> Result<Option<Room>, RepoError> {
        let row = sqlx::query("SELECT data FROM rooms WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_room", e))?;
        row.as_ref().map(from_row).transpose()
    }

    async fn save(&self, room: &Room) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, data) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET data = excluded.data
            "#,
        )
        .bind(room.id.to_string())
        .bind(to_json(room)?)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_room", e))?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Room>, RepoError> {
        let rows = sqlx::query("SELECT data FROM rooms ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_rooms", e))?;
        from_rows(&rows)
    }
}

#[async_trait]
impl ConnectionRepo for SqliteWorld {
    async fn get(&self, id: ConnectionId) -> Result<Option<RoomConnection>, RepoError> {
        let row = sqlx::query("SELECT data FROM connections WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_connection", e))?;
        row.as_ref().map(from_row).transpose()
    }

    async fn save(&self, connection: &RoomConnection) -> Result<(), RepoError> {
        let (room1, room2) = connection.rooms();
        sqlx::query(
            r#"
            INSERT INTO connections (id, room1_id, room2_id, data)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                room1_id = excluded.room1_id,
                room2_id = excluded.room2_id,
                data = excluded.data
            "#,
        )
        .bind(connection.id.to_string())
        .bind(room1.to_string())
        .bind(room2.to_string())
        .bind(to_json(connection)?)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_connection", e))?;
        Ok(())
    }

    async fn list_for_room(&self, room_id: RoomId) -> Result<Vec<RoomConnection>, RepoError> {
        let id = room_id.to_string();
        let rows = sqlx::query(
            "SELECT data FROM connections WHERE room1_id = ? OR room2_id = ? ORDER BY rowid",
        )
        .bind(id.as_str())
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_connections_for_room", e))?;
        from_rows(&rows)
    }
}
