use crate::auth::{AllowAll, JoinAuthorizer};
use crate::relay::{Outbound, SignalingRelay};
use dashmap::DashMap;
use std::sync::Arc;
use switchboard_core::{
    ClientMessage, ConnectionId, IceServerConfig, RelayError, ServerMessage, UserId,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

struct SignalingInner {
    relay: SignalingRelay,
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>,
    authorizer: Arc<dyn JoinAuthorizer>,
    ice_servers: Vec<IceServerConfig>,
}

/// Clone-able handle gluing the relay to the transport: it owns the
/// per-connection outbound channels and executes the relay's send lists.
///
/// Sends are fire-and-forget; a dead channel surfaces later as a
/// transport disconnect, which is the adapter's concern.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self::with_authorizer(ice_servers, Arc::new(AllowAll))
    }

    pub fn with_authorizer(
        ice_servers: Vec<IceServerConfig>,
        authorizer: Arc<dyn JoinAuthorizer>,
    ) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                relay: SignalingRelay::new(),
                peers: DashMap::new(),
                authorizer,
                ice_servers,
            }),
        }
    }

    pub fn relay(&self) -> &SignalingRelay {
        &self.inner.relay
    }

    /// Channel establishment: registers the connection, stores its
    /// outbound sender, and greets it with `welcome` plus the ICE
    /// configuration.
    pub fn attach(
        &self,
        id: ConnectionId,
        user: UserId,
        tx: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<(), RelayError> {
        self.inner.relay.connect(id, user)?;
        self.inner.peers.insert(id, tx);

        self.send_to(id, ServerMessage::Welcome { connection_id: id });
        if !self.inner.ice_servers.is_empty() {
            self.send_to(
                id,
                ServerMessage::IceConfig {
                    ice_servers: self.inner.ice_servers.clone(),
                },
            );
        }

        Ok(())
    }

    /// One inbound text frame from the transport. Frames that fail to
    /// parse are answered with `error { InvalidMessage }` to the sender
    /// only.
    pub async fn handle_frame(&self, sender: ConnectionId, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => self.handle_message(sender, message).await,
            Err(err) => {
                warn!("unparseable frame from {sender}: {err}");
                self.send_to(
                    sender,
                    RelayError::InvalidMessage(err.to_string()).to_message(),
                );
            }
        }
    }

    pub async fn handle_message(&self, sender: ConnectionId, message: ClientMessage) {
        if let ClientMessage::Join { room, user } = &message {
            if !self.inner.authorizer.authorize(room, user).await {
                info!("join of room {room} denied for {user}");
                let err = RelayError::Unauthorized {
                    room: room.clone(),
                    user: user.clone(),
                };
                self.send_to(sender, err.to_message());
                return;
            }
        }

        self.execute(self.inner.relay.handle_message(sender, message));
    }

    /// Transport-level disconnect. Safe to call more than once; the
    /// relay's teardown converges with any racing explicit leave.
    pub fn disconnect(&self, id: ConnectionId) {
        self.execute(self.inner.relay.handle_disconnect(id));
        self.inner.peers.remove(&id);
    }

    fn execute(&self, outbound: Vec<Outbound>) {
        for Outbound { to, message } in outbound {
            self.send_to(to, message);
        }
    }

    fn send_to(&self, to: ConnectionId, message: ServerMessage) {
        if let Some(peer) = self.inner.peers.get(&to) {
            if peer.send(message).is_err() {
                warn!("outbound channel for {to} is closed");
            }
        } else {
            warn!("attempted to send to unknown connection {to}");
        }
    }
}
