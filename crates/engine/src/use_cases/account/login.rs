//! Login use case.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::{AccountError, Authenticated};
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, RoomRepo};
use crate::use_cases::presence::{occupants, room_enter_messages};

/// Logs a player in by exact name and announces them to their room.
pub struct LoginUser {
    players: Arc<dyn PlayerRepo>,
    rooms: Arc<dyn RoomRepo>,
    locks: Arc<EntityLocks>,
}

impl LoginUser {
    pub fn new(
        players: Arc<dyn PlayerRepo>,
        rooms: Arc<dyn RoomRepo>,
        locks: Arc<EntityLocks>,
    ) -> Self {
        Self {
            players,
            rooms,
            locks,
        }
    }

    /// A miss never writes anything and is indistinguishable from a wrong
    /// password.
    pub async fn execute(&self, name: &str, _password: &str) -> Result<Authenticated, AccountError> {
        let found = self
            .players
            .find_by_name(name)
            .await?
            .ok_or(AccountError::LoginFailed)?;

        let _guard = self.locks.lock(found.id).await;
        let mut player = self
            .players
            .get(found.id)
            .await?
            .ok_or(AccountError::PlayerNotFound(found.id))?;
        player.is_online = true;
        self.players.save(&player).await?;

        tracing::info!(player_id = %player.id, name = %player.name, "Player logged in");

        let mut messages = vec![Message::to_origin(format!(
            "Successfully logged in. Welcome back {}!",
            player.name
        ))];

        if let Some(room_id) = player.current_room_id {
            match self.rooms.get(room_id).await? {
                Some(room) => {
                    let others = occupants(self.players.as_ref(), room.id).await?;
                    messages.extend(room_enter_messages(&player, &room, &others));
                }
                None => {
                    tracing::warn!(player_id = %player.id, room_id = %room_id, "Player's room no longer exists");
                }
            }
        }

        Ok(Authenticated {
            player_id: player.id,
            messages,
        })
    }

    /// Restore the online flag after a session has bound `player_id`.
    ///
    /// A logout for the player's previous session can land between the
    /// login's write and the bind. Run after the bind, under the player's
    /// lock, this undoes it.
    pub async fn keep_online(&self, player_id: PlayerId) -> Result<(), AccountError> {
        let _guard = self.locks.lock(player_id).await;
        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(AccountError::PlayerNotFound(player_id))?;
        if player.is_online {
            return Ok(());
        }

        player.is_online = true;
        self.players.save(&player).await?;
        tracing::info!(player_id = %player.id, "Player marked online again after racing logout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockPlayerRepo, MockRoomRepo};
    use crate::use_cases::test_support::{bodies_for, TestWorld};
    use mudlark_domain::Player;

    fn login(world: &TestWorld) -> LoginUser {
        LoginUser::new(world.players(), world.rooms(), world.locks.clone())
    }

    #[tokio::test]
    async fn unknown_name_fails_without_writing() {
        let mut players = MockPlayerRepo::new();
        players.expect_find_by_name().returning(|_| Ok(None));
        players.expect_save().never();

        let use_case = LoginUser::new(
            Arc::new(players),
            Arc::new(MockRoomRepo::new()),
            Arc::new(EntityLocks::new()),
        );
        let result = use_case.execute("NOBODY", "pw").await;

        assert!(matches!(result, Err(AccountError::LoginFailed)));
        assert_eq!(result.unwrap_err().to_string(), "Failed to log in");
    }

    #[tokio::test]
    async fn unknown_name_creates_no_player() {
        let world = TestWorld::new();
        let result = login(&world).execute("GHOST", "pw").await;

        assert!(result.is_err());
        assert!(PlayerRepo::list_all(world.world.as_ref())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn login_marks_online_and_announces_to_room() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let bob = world.player_in("BOB", hall.id).await;
        let mut alice = Player::new("ALICE").unwrap().with_room(hall.id);
        alice.is_online = false;
        world.save_player(&alice).await;

        let result = login(&world).execute("ALICE", "pw").await.unwrap();

        assert_eq!(result.player_id, alice.id);
        assert!(world.player(alice.id).await.is_online);
        assert_eq!(
            result.messages[0],
            Message::to_origin("Successfully logged in. Welcome back ALICE!")
        );
        assert_eq!(
            bodies_for(&result.messages, alice.id),
            vec!["<ACTION>Entered room Hall</ACTION>"]
        );
        assert_eq!(
            bodies_for(&result.messages, bob.id),
            vec!["<INFO>ALICE entered the room.</INFO>"]
        );
    }

    #[tokio::test]
    async fn login_in_the_void_only_welcomes() {
        let world = TestWorld::new();
        world.save_player(&Player::new("ALICE").unwrap()).await;

        let result = login(&world).execute("ALICE", "pw").await.unwrap();

        assert_eq!(result.messages.len(), 1);
    }

    #[tokio::test]
    async fn keep_online_restores_a_player_logged_out_underneath() {
        let world = TestWorld::new();
        let mut alice = Player::new("ALICE").unwrap();
        alice.is_online = false;
        world.save_player(&alice).await;

        login(&world).keep_online(alice.id).await.unwrap();

        assert!(world.player(alice.id).await.is_online);
    }

    #[tokio::test]
    async fn keep_online_does_not_write_when_already_online() {
        let alice = Player::new("ALICE").unwrap().online();
        let stored = alice.clone();
        let mut players = MockPlayerRepo::new();
        players
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        players.expect_save().never();

        let use_case = LoginUser::new(
            Arc::new(players),
            Arc::new(MockRoomRepo::new()),
            Arc::new(EntityLocks::new()),
        );

        use_case.keep_online(alice.id).await.unwrap();
    }
}
