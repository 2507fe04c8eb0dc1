//! The closed set of verbs and their static rules.
//!
//! Everything the interpreter needs to know about a verb lives in one row of
//! [`VERBS`]. Adding a verb means adding a variant and a row.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    CreateUser,
    Login,
    Help,
    About,
    Look,
    LookAt,
    Go,
    Open,
    Take,
    Drop,
    Inventory,
    Say,
    Whisper,
    Dig,
    Teleport,
    ChangeRoom,
    Create,
    Describe,
    Door,
}

/// Static facts about one verb.
#[derive(Debug)]
pub struct VerbSpec {
    pub verb: Verb,
    /// Upper-case literal the player types
    pub literal: &'static str,
    /// Anonymous callers are rejected
    pub requires_identity: bool,
    /// Minimum number of noun phrases
    pub expected_nouns: usize,
    pub help: &'static str,
}

/// Rows are in `Verb` declaration order.
pub const VERBS: &[VerbSpec] = &[
    VerbSpec {
        verb: Verb::CreateUser,
        literal: "CREATEUSER",
        requires_identity: false,
        expected_nouns: 2,
        help: "Create a new player character.",
    },
    VerbSpec {
        verb: Verb::Login,
        literal: "LOGIN",
        requires_identity: false,
        expected_nouns: 2,
        help: "Login with a player character you created earlier.",
    },
    VerbSpec {
        verb: Verb::Help,
        literal: "HELP",
        requires_identity: false,
        expected_nouns: 0,
        help: "Shows a list of commands.",
    },
    VerbSpec {
        verb: Verb::About,
        literal: "ABOUT",
        requires_identity: false,
        expected_nouns: 0,
        help: "Information about this game.",
    },
    VerbSpec {
        verb: Verb::Look,
        literal: "LOOK",
        requires_identity: true,
        expected_nouns: 0,
        help: "Look around in the current room.",
    },
    VerbSpec {
        verb: Verb::LookAt,
        literal: "LOOKAT",
        requires_identity: true,
        expected_nouns: 1,
        help: "Look at an item you carry, an item in the room, or another player.",
    },
    VerbSpec {
        verb: Verb::Go,
        literal: "GO",
        requires_identity: true,
        expected_nouns: 1,
        help: "Go into a numbered exit.",
    },
    VerbSpec {
        verb: Verb::Open,
        literal: "OPEN",
        requires_identity: true,
        expected_nouns: 1,
        help: "Open a numbered door.",
    },
    VerbSpec {
        verb: Verb::Take,
        literal: "TAKE",
        requires_identity: true,
        expected_nouns: 1,
        help: "Pick up an item into your inventory.",
    },
    VerbSpec {
        verb: Verb::Drop,
        literal: "DROP",
        requires_identity: true,
        expected_nouns: 1,
        help: "Drop an item from your inventory.",
    },
    VerbSpec {
        verb: Verb::Inventory,
        literal: "INVENTORY",
        requires_identity: true,
        expected_nouns: 0,
        help: "Show your inventory.",
    },
    VerbSpec {
        verb: Verb::Say,
        literal: "SAY",
        requires_identity: true,
        expected_nouns: 1,
        help: "Say something out loud (everyone in the room can hear it).",
    },
    VerbSpec {
        verb: Verb::Whisper,
        literal: "WHISPER",
        requires_identity: true,
        expected_nouns: 2,
        help: "Say something to someone else (only the intended person can hear it).",
    },
    VerbSpec {
        verb: Verb::Dig,
        literal: "@DIG",
        requires_identity: true,
        expected_nouns: 0,
        help: "Create a new room. You will be teleported to the new room.",
    },
    VerbSpec {
        verb: Verb::Teleport,
        literal: "@TELEPORT",
        requires_identity: true,
        expected_nouns: 1,
        help: "Move to a different room by specifying an id.",
    },
    VerbSpec {
        verb: Verb::ChangeRoom,
        literal: "@CHANGEROOM",
        requires_identity: true,
        expected_nouns: 2,
        help: "Changes the current room's NAME or DESCRIPTION to a new value.",
    },
    VerbSpec {
        verb: Verb::Create,
        literal: "@CREATE",
        requires_identity: true,
        expected_nouns: 2,
        help: "Create a new item with a name and a description in the current room.",
    },
    VerbSpec {
        verb: Verb::Describe,
        literal: "@DESCRIBE",
        requires_identity: true,
        expected_nouns: 0,
        help: "Gives technical data about the current room.",
    },
    VerbSpec {
        verb: Verb::Door,
        literal: "@DOOR",
        requires_identity: true,
        expected_nouns: 1,
        help: "Turn a numbered exit into a closed door, optionally locked by an item name.",
    },
];

impl Verb {
    pub fn spec(self) -> &'static VerbSpec {
        &VERBS[self as usize]
    }

    pub fn literal(self) -> &'static str {
        self.spec().literal
    }

    pub fn requires_identity(self) -> bool {
        self.spec().requires_identity
    }

    pub fn expected_nouns(self) -> usize {
        self.spec().expected_nouns
    }

    pub fn all() -> impl Iterator<Item = Verb> {
        VERBS.iter().map(|spec| spec.verb)
    }

    /// One help line: literal, explanation and usage.
    pub fn help_line(self) -> String {
        let spec = self.spec();
        let usage = match spec.expected_nouns {
            0 => spec.literal.to_string(),
            1 => format!("{} [NOUN]", spec.literal),
            _ => format!("{} [NOUN 1] [NOUN 2]", spec.literal),
        };
        format!(
            "<STRONG>{}</STRONG>   {} use: <STRONG>{}</STRONG>",
            spec.literal, spec.help, usage
        )
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// The literal did not name a verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    /// Case-sensitive: the lexer has already upper-cased the token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VERBS
            .iter()
            .find(|spec| spec.literal == s)
            .map(|spec| spec.verb)
            .ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

/// Text for `HELP`.
pub fn help_text() -> String {
    let mut text = String::from("<STRONG>Commands:</STRONG>\n");
    for verb in Verb::all() {
        text.push_str(&verb.help_line());
        text.push('\n');
    }
    text.push_str("Put multi-word nouns in double quotes, e.g. SAY \"hello there\".\n");
    text
}

/// Text for `ABOUT`.
pub const ABOUT_TEXT: &str = "This is a small multi-user dungeon. Dig rooms, link them with \
doors, leave items lying around and talk to whoever else is online. Have fun!";

/// Greeting sent to every new connection.
pub const WELCOME_TEXT: &str = "<STRONG>Welcome to the MUD</STRONG>\n\
Please login using:\n\
LOGIN <username> <password>\n\
Or create a new user using:\n\
CREATEUSER <username> <password>\n";
