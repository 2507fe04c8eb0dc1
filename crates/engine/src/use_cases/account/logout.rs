//! Logout use case, run when a player's last session goes away.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::AccountError;
use crate::infrastructure::locks::EntityLocks;
use crate::infrastructure::ports::{PlayerRepo, SessionPresence};
use crate::use_cases::presence::{occupants_of, tell_others};

pub struct Logout {
    players: Arc<dyn PlayerRepo>,
    locks: Arc<EntityLocks>,
}

impl Logout {
    pub fn new(players: Arc<dyn PlayerRepo>, locks: Arc<EntityLocks>) -> Self {
        Self { players, locks }
    }

    /// Mark the player offline and tell the room. Already-offline players
    /// produce no messages.
    ///
    /// `presence` is asked under the player's lock: a session that bound the
    /// player after the caller decided to log out keeps them online.
    pub async fn execute(
        &self,
        player_id: PlayerId,
        presence: &dyn SessionPresence,
    ) -> Result<Vec<Message>, AccountError> {
        let _guard = self.locks.lock(player_id).await;
        if presence.is_connected(player_id).await {
            tracing::debug!(player_id = %player_id, "Player reconnected, skipping logout");
            return Ok(Vec::new());
        }

        let mut player = self
            .players
            .get(player_id)
            .await?
            .ok_or(AccountError::PlayerNotFound(player_id))?;

        if !player.is_online {
            return Ok(Vec::new());
        }
        player.is_online = false;
        self.players.save(&player).await?;

        tracing::info!(player_id = %player.id, name = %player.name, "Player logged out");

        let remaining = occupants_of(self.players.as_ref(), player.current_room_id).await?;
        Ok(tell_others(
            &player,
            &remaining,
            &format!("<INFO>{} left the game.</INFO>", player.name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockSessionPresence;
    use crate::use_cases::test_support::TestWorld;

    fn presence(connected: bool) -> MockSessionPresence {
        let mut presence = MockSessionPresence::new();
        presence
            .expect_is_connected()
            .returning(move |_| connected);
        presence
    }

    #[tokio::test]
    async fn logout_marks_offline_and_tells_the_room() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let alice = world.player_in("ALICE", hall.id).await;
        let bob = world.player_in("BOB", hall.id).await;

        let messages = Logout::new(world.players(), world.locks.clone())
            .execute(alice.id, &presence(false))
            .await
            .unwrap();

        assert!(!world.player(alice.id).await.is_online);
        assert_eq!(
            messages,
            vec![Message::to(bob.id, "<INFO>ALICE left the game.</INFO>")]
        );
    }

    #[tokio::test]
    async fn logout_of_offline_player_is_silent() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let mut alice = world.player_in("ALICE", hall.id).await;
        alice.is_online = false;
        world.save_player(&alice).await;
        world.player_in("BOB", hall.id).await;

        let messages = Logout::new(world.players(), world.locks.clone())
            .execute(alice.id, &presence(false))
            .await
            .unwrap();

        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let world = TestWorld::new();
        let result = Logout::new(world.players(), world.locks.clone())
            .execute(PlayerId::new(), &presence(false))
            .await;

        assert!(matches!(result, Err(AccountError::PlayerNotFound(_))));
    }

    #[tokio::test]
    async fn player_with_a_live_session_stays_online() {
        let world = TestWorld::new();
        let hall = world.room("Hall").await;
        let alice = world.player_in("ALICE", hall.id).await;
        world.player_in("BOB", hall.id).await;

        let messages = Logout::new(world.players(), world.locks.clone())
            .execute(alice.id, &presence(true))
            .await
            .unwrap();

        assert!(messages.is_empty());
        assert!(world.player(alice.id).await.is_online);
    }
}
