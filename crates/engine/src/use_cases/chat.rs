//! Chat use cases: saying something to the room, whispering to one player.

use std::sync::Arc;

use mudlark_domain::{Message, PlayerId};

use super::presence::{load_actor, occupants_of, tell_others};
use super::{Advisory, LookupError};
use crate::infrastructure::ports::{PlayerRepo, RepoError};

/// Container for chat use cases.
pub struct ChatUseCases {
    pub say: Arc<Say>,
    pub whisper: Arc<Whisper>,
}

impl ChatUseCases {
    pub fn new(say: Arc<Say>, whisper: Arc<Whisper>) -> Self {
        Self { say, whisper }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("{0} is not in the room.")]
    NotInRoom(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl Advisory for ChatError {
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

pub struct Say {
    players: Arc<dyn PlayerRepo>,
}

impl Say {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    /// Echo to the actor, and repeat to every other occupant. In the void
    /// only the echo is produced.
    pub async fn execute(&self, actor_id: PlayerId, text: &str) -> Result<Vec<Message>, ChatError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let listeners = occupants_of(self.players.as_ref(), actor.current_room_id).await?;

        let mut messages = vec![Message::to(
            actor.id,
            format!("<ACTION>You say:</ACTION> {text}"),
        )];
        messages.extend(tell_others(
            &actor,
            &listeners,
            &format!("<ACTION>{} says:</ACTION> {text}", actor.name),
        ));
        Ok(messages)
    }
}

pub struct Whisper {
    players: Arc<dyn PlayerRepo>,
}

impl Whisper {
    pub fn new(players: Arc<dyn PlayerRepo>) -> Self {
        Self { players }
    }

    /// The first other occupant whose name matches `target`, ignoring case,
    /// hears the text. Everyone else in the room only learns that a whisper
    /// happened.
    pub async fn execute(
        &self,
        actor_id: PlayerId,
        target: &str,
        text: &str,
    ) -> Result<Vec<Message>, ChatError> {
        let actor = load_actor(self.players.as_ref(), actor_id).await?;
        let present = occupants_of(self.players.as_ref(), actor.current_room_id).await?;

        let listener = present
            .iter()
            .find(|p| p.id != actor.id && p.is_named(target))
            .ok_or_else(|| ChatError::NotInRoom(target.to_string()))?;

        let mut messages = vec![
            Message::to(
                actor.id,
                format!("<ACTION>You whisper to {}:</ACTION> {text}", listener.name),
            ),
            Message::to(
                listener.id,
                format!("<ACTION>{} whispers to you:</ACTION> {text}", actor.name),
            ),
        ];
        let notice = format!(
            "<ACTION>{} whispers something to {}.</ACTION>",
            actor.name, listener.name
        );
        messages.extend(
            present
                .iter()
                .filter(|p| p.id != actor.id && p.id != listener.id)
                .map(|p| Message::to(p.id, notice.as_str())),
        );
        Ok(messages)
    }
}
