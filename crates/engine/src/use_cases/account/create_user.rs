//! Create user use case.

use std::sync::Arc;

use mudlark_domain::{Message, Player};

use super::{AccountError, Authenticated};
use crate::infrastructure::ports::PlayerRepo;

/// Creates a new player, online and in the void.
///
/// Passwords are accepted but not stored. Names are not unique: a second
/// `CREATEUSER Alice` makes a second, distinct Alice.
pub struct CreateUser {
    players: Arc<dyn PlayerRepo>,
}

impl CreateUser {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, name: &str, _password: &str) -> Result<Authenticated, AccountError> {
        let player = Player::new(name)
            .map_err(|_| AccountError::InvalidName)?
            .online();
        self.players.save(&player).await?;

        tracing::info!(player_id = %player.id, name = %player.name, "Player created");

        Ok(Authenticated {
            player_id: player.id,
            messages: vec![Message::to_origin(format!(
                "Successfully created player {name}. Welcome {name}!",
                name = player.name
            ))],
        })
    }
}
