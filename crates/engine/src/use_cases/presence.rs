//! Who is where, and what the others are told when that changes.

use mudlark_domain::{ordered_exits, Exit, Message, Player, PlayerId, Room, RoomId};

use super::LookupError;
use crate::infrastructure::ports::{ConnectionRepo, PlayerRepo, RepoError, RoomRepo};

pub(crate) async fn load_actor(
    players: &dyn PlayerRepo,
    actor_id: PlayerId,
) -> Result<Player, LookupError> {
    players
        .get(actor_id)
        .await?
        .ok_or(LookupError::ActorNotFound(actor_id))
}

pub(crate) async fn load_room(rooms: &dyn RoomRepo, room_id: RoomId) -> Result<Room, LookupError> {
    rooms
        .get(room_id)
        .await?
        .ok_or(LookupError::RoomNotFound(room_id))
}

/// The room `actor` stands in. Fails for the void.
pub(crate) async fn current_room(rooms: &dyn RoomRepo, actor: &Player) -> Result<Room, LookupError> {
    let room_id = actor.current_room_id.ok_or(LookupError::InVoid)?;
    load_room(rooms, room_id).await
}

/// Online players whose current room is `room_id`.
pub(crate) async fn occupants(
    players: &dyn PlayerRepo,
    room_id: RoomId,
) -> Result<Vec<Player>, RepoError> {
    Ok(players
        .list_in_room(room_id)
        .await?
        .into_iter()
        .filter(|player| player.is_occupant_of(room_id))
        .collect())
}

/// Occupants of `room_id`, or nobody for the void.
pub(crate) async fn occupants_of(
    players: &dyn PlayerRepo,
    room_id: Option<RoomId>,
) -> Result<Vec<Player>, RepoError> {
    match room_id {
        Some(room_id) => occupants(players, room_id).await,
        None => Ok(Vec::new()),
    }
}

/// Numbered exits of `room_id`, in the order `GO` indexes them.
pub(crate) async fn exits_from(
    connections: &dyn ConnectionRepo,
    room_id: RoomId,
) -> Result<Vec<Exit>, RepoError> {
    Ok(ordered_exits(
        room_id,
        connections.list_for_room(room_id).await?,
    ))
}

/// One message per occupant other than `actor`.
pub(crate) fn tell_others(actor: &Player, occupants: &[Player], body: &str) -> Vec<Message> {
    occupants
        .iter()
        .filter(|other| other.id != actor.id)
        .map(|other| Message::to(other.id, body))
        .collect()
}

/// Arrival confirmation for `actor` plus a notice to everyone already there.
pub fn room_enter_messages(actor: &Player, room: &Room, occupants: &[Player]) -> Vec<Message> {
    let mut messages = vec![Message::to(
        actor.id,
        format!("<ACTION>Entered room {}</ACTION>", room.name),
    )];
    messages.extend(tell_others(
        actor,
        occupants,
        &format!("<INFO>{} entered the room.</INFO>", actor.name),
    ));
    messages
}

/// Departure notice to everyone left behind.
pub fn room_leave_messages(actor: &Player, occupants: &[Player]) -> Vec<Message> {
    tell_others(
        actor,
        occupants,
        &format!("<INFO>{} left the room.</INFO>", actor.name),
    )
}

/// Move `actor` into `destination`, persist it, and tell both rooms.
///
/// The caller must hold the actor's lock.
pub(crate) async fn relocate(
    players: &dyn PlayerRepo,
    mut actor: Player,
    destination: &Room,
) -> Result<Vec<Message>, RepoError> {
    let origin = actor.current_room_id.filter(|id| *id != destination.id);
    actor.current_room_id = Some(destination.id);
    players.save(&actor).await?;

    let arrivals = occupants(players, destination.id).await?;
    let mut messages = room_enter_messages(&actor, destination, &arrivals);
    messages.extend(room_leave_messages(
        &actor,
        &occupants_of(players, origin).await?,
    ));
    Ok(messages)
}
