//! Command interpreter.
//!
//! Turns one line of player input into the addressed messages it produces.
//! Nothing escapes as an error: parse failures and use-case failures each
//! become exactly one advisory message.

use std::sync::Arc;

use mudlark_domain::command::{help_text, ABOUT_TEXT};
use mudlark_domain::{parse, Command, CommandError, Message, PlayerId, Verb};

use crate::app::App;
use crate::use_cases::{AccountError, Advisory, Authenticated};

/// Shown instead of storage error details.
const STORAGE_FAILURE_TEXT: &str = "Something went wrong. Please try again.";

/// Result of interpreting one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub messages: Vec<Message>,
    /// Set when the line identified the caller as a player. The session
    /// layer binds the identity before dispatching `messages`.
    pub authenticated: Option<PlayerId>,
}

impl From<Vec<Message>> for Outcome {
    fn from(messages: Vec<Message>) -> Self {
        Self {
            messages,
            authenticated: None,
        }
    }
}

impl From<Message> for Outcome {
    fn from(message: Message) -> Self {
        vec![message].into()
    }
}

pub struct Interpreter {
    app: Arc<App>,
}

impl Interpreter {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    /// Interpret `line` on behalf of `actor`, the identity bound to the
    /// calling session, if any.
    pub async fn interpret(&self, line: &str, actor: Option<PlayerId>) -> Outcome {
        let command = match parse(line, actor) {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(error = %e, "Command rejected");
                return e.advisory(actor).into();
            }
        };

        tracing::debug!(verb = %command.verb, nouns = command.nouns.len(), "Interpreting command");

        match command.actor {
            None => self.anonymous(&command).await,
            Some(actor_id) => self.act(actor_id, &command).await.into(),
        }
    }

    /// Verbs available before login. Anything else is refused.
    async fn anonymous(&self, command: &Command) -> Outcome {
        let account = &self.app.use_cases.account;
        match command.verb {
            Verb::CreateUser => authenticated(
                account
                    .create_user
                    .execute(command.noun(0), command.noun(1))
                    .await,
            ),
            Verb::Login => authenticated(
                account
                    .login
                    .execute(command.noun(0), command.noun(1))
                    .await,
            ),
            Verb::Help => Message::to_origin(help_text()).into(),
            Verb::About => Message::to_origin(ABOUT_TEXT).into(),
            verb => CommandError::NotLoggedIn(verb).advisory(None).into(),
        }
    }

    async fn act(&self, actor: PlayerId, command: &Command) -> Vec<Message> {
        let uc = &self.app.use_cases;
        match command.verb {
            Verb::CreateUser | Verb::Login => vec![Message::warning(
                Some(actor),
                "You are already logged in. Reconnect to switch players.",
            )],
            Verb::Help => vec![Message::to(actor, help_text())],
            Verb::About => vec![Message::to(actor, ABOUT_TEXT)],
            Verb::Look => settle(actor, uc.look.describe_room.execute(actor).await),
            Verb::LookAt => settle(
                actor,
                uc.look.look_at.execute(actor, command.noun(0)).await,
            ),
            Verb::Go => settle(
                actor,
                uc.movement.go.execute(actor, command.noun(0)).await,
            ),
            Verb::Open => settle(
                actor,
                uc.movement.open_exit.execute(actor, command.noun(0)).await,
            ),
            Verb::Teleport => settle(
                actor,
                uc.movement.teleport.execute(actor, command.noun(0)).await,
            ),
            Verb::Take => settle(
                actor,
                uc.items.pickup.execute(actor, command.noun(0)).await,
            ),
            Verb::Drop => settle(actor, uc.items.drop.execute(actor, command.noun(0)).await),
            Verb::Inventory => settle(actor, uc.items.inventory.execute(actor).await),
            Verb::Create => settle(
                actor,
                uc.items
                    .create
                    .execute(actor, command.noun(0), command.noun(1))
                    .await,
            ),
            Verb::Say => settle(actor, uc.chat.say.execute(actor, command.noun(0)).await),
            Verb::Whisper => settle(
                actor,
                uc.chat
                    .whisper
                    .execute(actor, command.noun(0), command.noun(1))
                    .await,
            ),
            Verb::Dig => settle(actor, uc.building.dig.execute(actor).await),
            Verb::ChangeRoom => {
                let (name, description) = room_change(command);
                settle(
                    actor,
                    uc.building
                        .change_room
                        .execute(actor, name, description)
                        .await,
                )
            }
            Verb::Describe => settle(actor, uc.building.room_data.execute(actor).await),
            Verb::Door => settle(
                actor,
                uc.building
                    .make_door
                    .execute(actor, command.noun(0), command.optional_noun(1))
                    .await,
            ),
        }
    }
}

/// `@CHANGEROOM NAME x` or `@CHANGEROOM DESCRIPTION x`. Any other field
/// changes nothing.
fn room_change(command: &Command) -> (Option<String>, Option<String>) {
    let value = command.noun(1).to_string();
    match command.noun(0).to_ascii_uppercase().as_str() {
        "NAME" => (Some(value), None),
        "DESCRIPTION" => (None, Some(value)),
        _ => (None, None),
    }
}

fn authenticated(result: Result<Authenticated, AccountError>) -> Outcome {
    match result {
        Ok(auth) => Outcome {
            messages: auth.messages,
            authenticated: Some(auth.player_id),
        },
        Err(e) => advisory(None, &e).into(),
    }
}

fn settle<E: Advisory>(actor: PlayerId, result: Result<Vec<Message>, E>) -> Vec<Message> {
    match result {
        Ok(messages) => messages,
        Err(e) => vec![advisory(Some(actor), &e)],
    }
}

fn advisory<E: Advisory>(actor: Option<PlayerId>, error: &E) -> Message {
    let recipient = if error.to_origin() { None } else { actor };
    match error.repo_error() {
        Some(repo) => {
            tracing::error!(error = %repo, player_id = ?actor, "Storage failure while handling command");
            Message::warning(recipient, STORAGE_FAILURE_TEXT)
        }
        None => Message::warning(recipient, error.to_string()),
    }
}
