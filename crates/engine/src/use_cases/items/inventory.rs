//! Show inventory use case.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::ItemError;
use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases::presence::load_actor;

pub struct ShowInventory {
    players: Arc<dyn PlayerRepo>,
}

impl ShowInventory {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    pub async fn execute(&self, actor_id: PlayerId) -> Result<Vec<Message>, ItemError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;

        let listing = if actor.inventory.is_empty() {
            "nothing".to_string()
        } else {
            actor
                .inventory
                .iter()
                .map(|item| format!("<ITEM>{}</ITEM>", item.name))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(vec![Message::to(
            actor.id,
            format!("<STRONG>Inventory:</STRONG>\n{listing}"),
        )])
    }
}
