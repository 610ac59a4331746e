use crate::registry::ConnectionRegistry;
use crate::relay::Outbound;
use crate::room::RoomDirectory;
use serde_json::Value;
use switchboard_core::{
    ClientMessage, ConnectionId, MemberInfo, RelayError, RoomId, ServerMessage, UserId,
};
use tracing::info;

/// The protocol engine: validates and routes join/leave/offer/answer/
/// candidate traffic using the connection registry and the room
/// directory.
///
/// Dispatch never performs I/O. Every call returns the full list of sends
/// the transport must make; the signaling service executes them.
pub struct SignalingRelay {
    registry: ConnectionRegistry,
    rooms: RoomDirectory,
}

impl SignalingRelay {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            rooms: RoomDirectory::new(),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn rooms(&self) -> &RoomDirectory {
        &self.rooms
    }

    /// Transport-level channel establishment.
    pub fn connect(&self, id: ConnectionId, user: UserId) -> Result<(), RelayError> {
        self.registry.register(id, user)?;
        info!("connection {id} registered");
        Ok(())
    }

    /// Routes one inbound client message.
    ///
    /// Failures come back as an `error` event addressed to the sender;
    /// they never reach other participants and never abort the relay.
    pub fn handle_message(&self, sender: ConnectionId, message: ClientMessage) -> Vec<Outbound> {
        let result = match message {
            ClientMessage::Join { room, user } => self.join(sender, room, user),
            ClientMessage::Leave => Ok(self.leave(sender)),
            ClientMessage::Offer { target, payload } => {
                self.forward(sender, target, payload, |from, payload| {
                    ServerMessage::Offer { from, payload }
                })
            }
            ClientMessage::Answer { target, payload } => {
                self.forward(sender, target, payload, |from, payload| {
                    ServerMessage::Answer { from, payload }
                })
            }
            ClientMessage::Candidate { target, payload } => {
                self.forward(sender, target, payload, |from, payload| {
                    ServerMessage::Candidate { from, payload }
                })
            }
        };

        result.unwrap_or_else(|err| vec![Outbound::new(sender, err.to_message())])
    }

    /// Transport-level disconnect: equivalent to a leave followed by
    /// unregister, converging with any racing explicit leave.
    pub fn handle_disconnect(&self, sender: ConnectionId) -> Vec<Outbound> {
        let outbound = self.leave(sender);
        self.registry.unregister(&sender);
        info!("connection {sender} closed");
        outbound
    }

    fn join(
        &self,
        sender: ConnectionId,
        room: RoomId,
        user: UserId,
    ) -> Result<Vec<Outbound>, RelayError> {
        let current = self.registry.lookup(&sender)?;
        if let Some(existing) = current.room {
            // no implicit leave-then-join; switching rooms is an explicit
            // leave followed by a join on the client's side
            return Err(RelayError::AlreadyMember {
                connection: sender,
                room: existing,
            });
        }

        let others = self.rooms.join(&room, sender)?;
        self.registry.set_user(&sender, user.clone());
        self.registry.set_room(&sender, Some(room.clone()));

        info!(
            "connection {sender} joined room {room} with {} existing members",
            others.len()
        );

        let members = others
            .iter()
            .filter_map(|id| {
                // a member can vanish between snapshot and lookup; the
                // departure broadcast will tell the joiner soon enough
                self.registry.lookup(id).ok().map(|conn| MemberInfo {
                    connection_id: conn.id,
                    user: conn.user,
                })
            })
            .collect();

        let mut outbound = Vec::with_capacity(others.len() + 1);
        outbound.push(Outbound::new(
            sender,
            ServerMessage::ExistingMembers { members },
        ));
        for member in others {
            outbound.push(Outbound::new(
                member,
                ServerMessage::PeerJoined {
                    connection_id: sender,
                    user: user.clone(),
                },
            ));
        }

        Ok(outbound)
    }

    /// Leave side effects run exactly once per join even when an explicit
    /// leave races the transport disconnect: only the caller that wins
    /// `take_room` removes the membership and broadcasts.
    fn leave(&self, sender: ConnectionId) -> Vec<Outbound> {
        let Some(room) = self.registry.take_room(&sender) else {
            return Vec::new();
        };

        let remaining = self.rooms.leave(&room, &sender);
        info!("connection {sender} left room {room}");

        remaining
            .into_iter()
            .map(|member| {
                Outbound::new(
                    member,
                    ServerMessage::PeerLeft {
                        connection_id: sender,
                    },
                )
            })
            .collect()
    }

    /// Point-to-point negotiation messages are never broadcast: the
    /// target must be a current member of the sender's room, and the
    /// payload is forwarded verbatim to it alone.
    fn forward(
        &self,
        sender: ConnectionId,
        target: ConnectionId,
        payload: Value,
        make: fn(ConnectionId, Value) -> ServerMessage,
    ) -> Result<Vec<Outbound>, RelayError> {
        let conn = self.registry.lookup(&sender)?;
        let Some(room) = conn.room else {
            return Err(RelayError::UnknownTarget(target));
        };
        if !self.rooms.members_of(&room).contains(&target) {
            return Err(RelayError::UnknownTarget(target));
        }

        Ok(vec![Outbound::new(target, make(sender, payload))])
    }
}

impl Default for SignalingRelay {
    fn default() -> Self {
        Self::new()
    }
}
