//! Validated commands.

use thiserror::Error;

use crate::{Message, PlayerId};

use super::lexer::{lex, Sentence};
use super::verb::Verb;

/// A sentence bound to a known verb whose arity and identity checks passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub actor: Option<PlayerId>,
    pub verb: Verb,
    pub nouns: Vec<String>,
}

impl Command {
    /// Noun phrase at `index`, or `""` when the caller supplied fewer.
    pub fn noun(&self, index: usize) -> &str {
        self.nouns.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Noun phrase at `index`, if supplied.
    pub fn optional_noun(&self, index: usize) -> Option<&str> {
        self.nouns.get(index).map(String::as_str)
    }
}

/// Why a line did not become a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("nothing to parse")]
    Empty,

    #[error("failed to parse: mismatched quotes")]
    Illegal,

    #[error("unknown verb '{0}'")]
    UnknownVerb(String),

    #[error("{0} requires a logged in player")]
    NotLoggedIn(Verb),

    #[error("{verb} expects {expected} noun(s), found {found}")]
    MissingNouns {
        verb: Verb,
        expected: usize,
        found: usize,
    },
}

impl CommandError {
    /// The single advisory shown for this failure.
    pub fn advisory(&self, actor: Option<PlayerId>) -> Message {
        match self {
            CommandError::Empty => Message::new(actor, "<DEBUG>nothing to parse</DEBUG>"),
            CommandError::Illegal => Message::new(
                actor,
                "<DEBUG>Failed to parse: a quoted phrase was not closed properly.</DEBUG>",
            ),
            CommandError::UnknownVerb(word) => Message::warning(
                actor,
                format!("Expected a verb as the first word, found: '{word}'. Type HELP for a list of commands."),
            ),
            CommandError::NotLoggedIn(verb) => Message::warning(
                None,
                format!("You need to be logged in as a player character to use the command {verb}."),
            ),
            CommandError::MissingNouns {
                verb,
                expected,
                found,
            } => Message::warning(
                actor,
                format!(
                    "{verb} expects {expected} noun(s) but {found} were given. Use: {}",
                    verb.help_line()
                ),
            ),
        }
    }
}

impl TryFrom<Sentence> for Command {
    type Error = CommandError;

    fn try_from(sentence: Sentence) -> Result<Self, Self::Error> {
        let (actor, word, nouns) = match sentence {
            Sentence::Empty => return Err(CommandError::Empty),
            Sentence::Illegal => return Err(CommandError::Illegal),
            Sentence::Valid { actor, verb, nouns } => (actor, verb, nouns),
        };

        let verb: Verb = word
            .parse()
            .map_err(|_| CommandError::UnknownVerb(word.clone()))?;

        if verb.requires_identity() && actor.is_none() {
            return Err(CommandError::NotLoggedIn(verb));
        }

        if nouns.len() < verb.expected_nouns() {
            return Err(CommandError::MissingNouns {
                verb,
                expected: verb.expected_nouns(),
                found: nouns.len(),
            });
        }

        Ok(Command { actor, verb, nouns })
    }
}

/// Lex and build in one step.
pub fn parse(line: &str, actor: Option<PlayerId>) -> Result<Command, CommandError> {
    Command::try_from(lex(line, actor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(actor: Option<PlayerId>, verb: Verb, count: usize) -> Sentence {
        Sentence::Valid {
            actor,
            verb: verb.literal().to_string(),
            nouns: (0..count).map(|i| format!("N{i}")).collect(),
        }
    }

    #[test]
    fn too_few_nouns_never_builds() {
        let actor = Some(PlayerId::new());
        for verb in Verb::all() {
            for count in 0..verb.expected_nouns() {
                let result = Command::try_from(sentence(actor, verb, count));
                assert_eq!(
                    result,
                    Err(CommandError::MissingNouns {
                        verb,
                        expected: verb.expected_nouns(),
                        found: count,
                    })
                );
            }
            for count in verb.expected_nouns()..=verb.expected_nouns() + 1 {
                assert!(Command::try_from(sentence(actor, verb, count)).is_ok());
            }
        }
    }

    #[test]
    fn identity_required_verbs_reject_anonymous_callers() {
        for verb in Verb::all() {
            let result = Command::try_from(sentence(None, verb, verb.expected_nouns()));
            if verb.requires_identity() {
                assert_eq!(result, Err(CommandError::NotLoggedIn(verb)));
            } else {
                assert!(result.is_ok(), "{verb} should allow anonymous callers");
            }
        }
    }

    #[test]
    fn empty_and_illegal_sentences_fail() {
        assert_eq!(Command::try_from(Sentence::Empty), Err(CommandError::Empty));
        assert_eq!(Command::try_from(Sentence::Illegal), Err(CommandError::Illegal));
    }

    #[test]
    fn unknown_verb_fails() {
        assert_eq!(
            parse("dance wildly", None),
            Err(CommandError::UnknownVerb("DANCE".into()))
        );
    }

    #[test]
    fn parse_builds_full_command() {
        let actor = PlayerId::new();
        let command = parse(r#"whisper Bob "meet me outside""#, Some(actor)).unwrap();
        assert_eq!(command.verb, Verb::Whisper);
        assert_eq!(command.noun(0), "BOB");
        assert_eq!(command.noun(1), "meet me outside");
        assert_eq!(command.noun(2), "");
        assert_eq!(command.optional_noun(2), None);
    }

    #[test]
    fn advisories_are_tagged_and_addressed() {
        let actor = Some(PlayerId::new());
        assert!(CommandError::Empty.advisory(actor).body.starts_with("<DEBUG>"));
        let warning = CommandError::UnknownVerb("DANCE".into()).advisory(actor);
        assert!(warning.body.starts_with("<WARNING>"));
        assert_eq!(warning.recipient, actor);
        assert_eq!(
            CommandError::NotLoggedIn(Verb::Look).advisory(None).recipient,
            None
        );
    }
}
