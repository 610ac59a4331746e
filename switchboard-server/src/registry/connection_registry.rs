use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use switchboard_core::{ConnectionId, RelayError, RoomId, UserId};

/// Book-keeping record for one live transport channel.
///
/// A connection belongs to at most one room at a time. The record is
/// created when the transport establishes the channel and removed when it
/// closes, errors, or an explicit leave runs its course.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub user: UserId,
    pub room: Option<RoomId>,
}

/// The only place connection lifecycle is tracked.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, Connection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, id: ConnectionId, user: UserId) -> Result<(), RelayError> {
        match self.connections.entry(id) {
            Entry::Occupied(_) => Err(RelayError::DuplicateConnection(id)),
            Entry::Vacant(slot) => {
                slot.insert(Connection {
                    id,
                    user,
                    room: None,
                });
                Ok(())
            }
        }
    }

    pub fn lookup(&self, id: &ConnectionId) -> Result<Connection, RelayError> {
        self.connections
            .get(id)
            .map(|conn| conn.clone())
            .ok_or(RelayError::NotFound(*id))
    }

    /// Idempotent: disconnect notifications may race explicit leave
    /// processing for the same connection.
    pub fn unregister(&self, id: &ConnectionId) {
        self.connections.remove(id);
    }

    /// Pure bookkeeping. The relay coordinates this with the room
    /// directory to keep the two consistent.
    pub fn set_room(&self, id: &ConnectionId, room: Option<RoomId>) {
        if let Some(mut conn) = self.connections.get_mut(id) {
            conn.room = room;
        }
    }

    /// The `join` payload's display identity supersedes whatever the
    /// transport registered with.
    pub fn set_user(&self, id: &ConnectionId, user: UserId) {
        if let Some(mut conn) = self.connections.get_mut(id) {
            conn.user = user;
        }
    }

    /// Atomically clears and returns the connection's room pointer.
    /// When an explicit leave and a disconnect race, exactly one caller
    /// observes `Some` and runs the leave side effects.
    pub fn take_room(&self, id: &ConnectionId) -> Option<RoomId> {
        self.connections.get_mut(id).and_then(|mut conn| conn.room.take())
    }
}
