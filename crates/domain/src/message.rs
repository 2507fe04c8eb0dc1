//! Addressed output produced by game actions.

use crate::PlayerId;

/// A line of narrative output and who should receive it.
///
/// A message with no recipient goes back to the connection that issued the
/// command. A message with a recipient goes to whichever live session holds
/// that player, and is dropped if none does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub recipient: Option<PlayerId>,
    pub body: String,
}

impl Message {
    pub fn new(recipient: Option<PlayerId>, body: impl Into<String>) -> Self {
        Self {
            recipient,
            body: body.into(),
        }
    }

    /// Addressed to one player.
    pub fn to(player_id: PlayerId, body: impl Into<String>) -> Self {
        Self::new(Some(player_id), body)
    }

    /// Addressed to the originating connection only.
    pub fn to_origin(body: impl Into<String>) -> Self {
        Self::new(None, body)
    }

    /// A `<WARNING>` advisory.
    pub fn warning(recipient: Option<PlayerId>, text: impl AsRef<str>) -> Self {
        Self::new(recipient, format!("<WARNING>{}</WARNING>", text.as_ref()))
    }

    pub fn is_for(&self, player_id: PlayerId) -> bool {
        self.recipient == Some(player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_wraps_text_in_tag() {
        let msg = Message::warning(None, "Nope.");
        assert_eq!(msg.body, "<WARNING>Nope.</WARNING>");
        assert!(msg.recipient.is_none());
    }
}
