//! Turns a raw command line into a [`Sentence`].

use crate::PlayerId;

use super::verb::Verb;

/// Single-word shortcuts, matched exactly against the first token. `L` and
/// `GET` are not abbreviations.
///
/// Expansions are verbs, not text, so an expansion can never be another
/// abbreviation.
pub const ABBREVIATIONS: &[(&str, Verb)] = &[
    ("l", Verb::Look),
    ("i", Verb::Inventory),
    ("get", Verb::Take),
    ("speak", Verb::Say),
    ("?", Verb::Help),
    ("x", Verb::LookAt),
];

/// Lexer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    /// No tokens at all
    Empty,
    /// Malformed quoting
    Illegal,
    Valid {
        actor: Option<PlayerId>,
        /// Upper-cased first token
        verb: String,
        nouns: Vec<String>,
    },
}

impl Sentence {
    pub fn actor(&self) -> Option<PlayerId> {
        match self {
            Sentence::Valid { actor, .. } => *actor,
            _ => None,
        }
    }
}

/// The verb an abbreviation stands for, if `token` is one.
pub fn expand_abbreviation(token: &str) -> Option<Verb> {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, verb)| *verb)
}

/// Lex `line` on behalf of `actor`, expanding a leading abbreviation first.
pub fn lex(line: &str, actor: Option<PlayerId>) -> Sentence {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Sentence::Empty;
    };

    match expand_abbreviation(first) {
        Some(verb) => {
            let expanded = std::iter::once(verb.literal())
                .chain(tokens)
                .collect::<Vec<_>>()
                .join(" ");
            tokenize(&expanded, actor)
        }
        None => tokenize(line, actor),
    }
}

/// Lex without abbreviation expansion.
///
/// Unquoted tokens are upper-cased and stand alone. A token starting with `"`
/// opens a phrase that runs until a token ending with `"`; the quote marks are
/// stripped and the phrase keeps its case. An unterminated phrase, or a
/// closing quote with no phrase open, makes the whole line illegal.
pub fn tokenize(line: &str, actor: Option<PlayerId>) -> Sentence {
    let mut tokens = line.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Sentence::Empty;
    };

    let mut nouns = Vec::new();
    let mut phrase: Option<Vec<&str>> = None;

    for token in tokens {
        match phrase.as_mut() {
            Some(parts) => {
                if let Some(last) = token.strip_suffix('"') {
                    parts.push(last);
                    nouns.push(join_phrase(parts));
                    phrase = None;
                } else {
                    parts.push(token);
                }
            }
            None => {
                if let Some(opened) = token.strip_prefix('"') {
                    match opened.strip_suffix('"') {
                        Some(whole) => nouns.push(whole.to_string()),
                        None => phrase = Some(vec![opened]),
                    }
                } else if token.ends_with('"') {
                    return Sentence::Illegal;
                } else {
                    nouns.push(token.to_uppercase());
                }
            }
        }
    }

    if phrase.is_some() {
        return Sentence::Illegal;
    }

    Sentence::Valid {
        actor,
        verb: verb.to_uppercase(),
        nouns,
    }
}

fn join_phrase(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(verb: &str, nouns: &[&str]) -> Sentence {
        Sentence::Valid {
            actor: None,
            verb: verb.to_string(),
            nouns: nouns.iter().map(|n| n.to_string()).collect(),
        }
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(lex("", None), Sentence::Empty);
        assert_eq!(lex("   \t ", None), Sentence::Empty);
    }

    #[test]
    fn unquoted_tokens_are_uppercased_single_nouns() {
        assert_eq!(lex("go 0", None), valid("GO", &["0"]));
        assert_eq!(
            lex("lookat brass  lamp", None),
            valid("LOOKAT", &["BRASS", "LAMP"])
        );
    }

    #[test]
    fn quoted_phrases_keep_case_and_spacing_collapses() {
        assert_eq!(
            lex(r#"whisper "a b" "c d""#, None),
            valid("WHISPER", &["a b", "c d"])
        );
        assert_eq!(
            lex(r#"say "Hello   there, friend""#, None),
            valid("SAY", &["Hello there, friend"])
        );
        assert_eq!(lex(r#"say "Hi""#, None), valid("SAY", &["Hi"]));
        assert_eq!(lex(r#"say """#, None), valid("SAY", &[""]));
    }

    #[test]
    fn any_two_quoted_phrases_come_back_verbatim() {
        let words = ["a", "Lamp", "x-1", "it's", "!"];
        for a in words {
            for b in words {
                for c in words {
                    let line = format!(r#"VERB "{a} {b}" "{c} {a}""#);
                    assert_eq!(
                        lex(&line, None),
                        valid("VERB", &[&format!("{a} {b}"), &format!("{c} {a}")]),
                        "line: {line}"
                    );
                }
            }
        }
    }

    #[test]
    fn unterminated_quote_fails_closed() {
        assert_eq!(lex(r#"say "hello there"#, None), Sentence::Illegal);
        assert_eq!(lex(r#"whisper bob "psst"#, None), Sentence::Illegal);
        assert_eq!(lex(r#"say ""#, None), Sentence::Illegal);
    }

    #[test]
    fn stray_closing_quote_is_illegal() {
        assert_eq!(lex(r#"say hello""#, None), Sentence::Illegal);
    }

    #[test]
    fn actor_is_carried_through() {
        let actor = PlayerId::new();
        assert_eq!(lex("look", Some(actor)).actor(), Some(actor));
        assert_eq!(lex("look", None).actor(), None);
    }

    #[test]
    fn abbreviation_matches_lexing_the_literal_expansion() {
        let actor = Some(PlayerId::new());
        let tails = ["", " lamp", r#" "old lamp""#, " 0 1", r#" "broken"#];
        for (short, verb) in ABBREVIATIONS {
            for tail in tails {
                let abbreviated = format!("{short}{tail}");
                let literal = format!("{}{tail}", verb.literal());
                assert_eq!(
                    lex(&abbreviated, actor),
                    lex(&literal, actor),
                    "{abbreviated} vs {literal}"
                );
            }
        }
    }

    #[test]
    fn no_expansion_is_itself_an_abbreviation() {
        for (_, verb) in ABBREVIATIONS {
            assert!(expand_abbreviation(verb.literal()).is_none());
        }
    }

    #[test]
    fn abbreviations_are_case_sensitive() {
        assert_eq!(expand_abbreviation("L"), None);
        assert_eq!(expand_abbreviation("GET"), None);
        assert_eq!(lex("GET lamp", None), valid("GET", &["LAMP"]));
        assert_eq!(lex("L", None), valid("L", &[]));
    }

    #[test]
    fn abbreviation_only_applies_to_first_token() {
        assert_eq!(lex("take l", None), valid("TAKE", &["L"]));
        assert_eq!(lex("get lamp", None), valid("TAKE", &["LAMP"]));
    }
}
