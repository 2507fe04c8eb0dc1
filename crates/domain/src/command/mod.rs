//! Command pipeline: raw line -> [`Sentence`] -> [`Command`].

#[allow(clippy::module_inception)]
mod command;
mod lexer;
mod verb;

pub use command::{parse, Command, CommandError};
pub use lexer::{expand_abbreviation, lex, tokenize, Sentence, ABBREVIATIONS};
pub use verb::{help_text, UnknownVerb, Verb, VerbSpec, ABOUT_TEXT, VERBS, WELCOME_TEXT};
