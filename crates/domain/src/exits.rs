//! Exit ordering.
//!
//! Exit numbers shown by `LOOK` are the indices accepted by `GO`, `OPEN` and
//! `@DOOR`. All of them go through [`ordered_exits`], which sorts a room's
//! connections by the string form of the room on the far side.

use crate::{RoomConnection, RoomId};

/// One numbered way out of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub index: usize,
    pub connection: RoomConnection,
    /// Room on the far side of the connection
    pub target: RoomId,
}

impl Exit {
    pub fn is_open(&self) -> bool {
        self.connection.is_open
    }
}

/// Number the exits of `from` deterministically.
///
/// Connections that do not touch `from` are dropped. Two connections to the
/// same far room are ordered by connection id so the numbering stays stable.
pub fn ordered_exits(from: RoomId, connections: Vec<RoomConnection>) -> Vec<Exit> {
    let mut exits: Vec<(String, String, RoomConnection, RoomId)> = connections
        .into_iter()
        .filter_map(|connection| {
            let target = connection.other_room_id(from)?;
            Some((target.to_string(), connection.id.to_string(), connection, target))
        })
        .collect();

    exits.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    exits
        .into_iter()
        .enumerate()
        .map(|(index, (_, _, connection, target))| Exit {
            index,
            connection,
            target,
        })
        .collect()
}

/// Parse a player-supplied exit number.
pub fn parse_exit_index(text: &str) -> Option<usize> {
    text.trim().parse().ok()
}
