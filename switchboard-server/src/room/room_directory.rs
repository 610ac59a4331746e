use dashmap::DashMap;
use switchboard_core::{ConnectionId, RelayError, RoomId};

/// Maps room identifiers to the ordered set of member connections.
///
/// Membership order is join order and is load-bearing: the snapshot a new
/// joiner receives tells clients which side initiates each pairwise
/// offer, so it must be deterministic.
#[derive(Default)]
pub struct RoomDirectory {
    rooms: DashMap<RoomId, Vec<ConnectionId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Adds the connection, creating the room if absent, and returns the
    /// other members at join time in join order.
    ///
    /// The snapshot and the insert happen under the room's entry lock:
    /// two connections joining the same room concurrently can never both
    /// receive a snapshot that omits the other.
    pub fn join(
        &self,
        room: &RoomId,
        id: ConnectionId,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let mut members = self.rooms.entry(room.clone()).or_default();
        if members.contains(&id) {
            return Err(RelayError::AlreadyMember {
                connection: id,
                room: room.clone(),
            });
        }
        let others = members.clone();
        members.push(id);
        Ok(others)
    }

    /// Removes the connection and returns the remaining members. Leaving
    /// a room the connection is not in is a no-op, not an error. The room
    /// entry is dropped once membership becomes empty.
    pub fn leave(&self, room: &RoomId, id: &ConnectionId) -> Vec<ConnectionId> {
        let remaining = match self.rooms.get_mut(room) {
            Some(mut members) => {
                members.retain(|member| member != id);
                members.clone()
            }
            None => return Vec::new(),
        };

        if remaining.is_empty() {
            // re-check under the lock: a new joiner may have raced us
            self.rooms.remove_if(room, |_, members| members.is_empty());
        }

        remaining
    }

    /// Empty when the room does not exist: an absent room and an empty
    /// room are observably identical to callers.
    pub fn members_of(&self, room: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|members| members.clone())
            .unwrap_or_default()
    }

    pub fn room_exists(&self, room: &RoomId) -> bool {
        self.rooms.contains_key(room)
    }
}
