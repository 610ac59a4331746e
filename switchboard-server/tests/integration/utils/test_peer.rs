use std::time::Duration;
use switchboard_core::{
    ClientMessage, ConnectionId, RelayError, RoomId, ServerMessage, UserId,
};
use switchboard_server::SignalingService;
use tokio::sync::mpsc;

/// One fake client attached straight to the service, standing in for a
/// WebSocket connection. Inbound frames are fed through the same entry
/// points the socket handler uses; outbound messages land in a channel
/// this harness drains.
pub struct TestPeer {
    pub id: ConnectionId,
    service: SignalingService,
    rx: mpsc::UnboundedReceiver<ServerMessage>,
}

impl std::fmt::Debug for TestPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestPeer").field("id", &self.id).finish()
    }
}

impl TestPeer {
    /// Attach a fresh connection and swallow the `welcome` greeting.
    pub fn attach(service: &SignalingService, user: &str) -> Self {
        let mut peer = Self::attach_with_id(service, ConnectionId::new(), user)
            .expect("attach failed");

        let greeting = peer.try_recv();
        assert!(
            matches!(
                greeting,
                Some(ServerMessage::Welcome { connection_id }) if connection_id == peer.id
            ),
            "expected welcome, got {greeting:?}"
        );

        peer
    }

    /// Attach under a caller-chosen id, keeping every greeting frame in
    /// the queue. Returns the registry error on refusal.
    pub fn attach_with_id(
        service: &SignalingService,
        id: ConnectionId,
        user: &str,
    ) -> Result<Self, RelayError> {
        let (tx, rx) = mpsc::unbounded_channel();
        service.attach(id, UserId::from(user), tx)?;

        Ok(Self {
            id,
            service: service.clone(),
            rx,
        })
    }

    pub async fn join(&self, room: &str, user: &str) {
        self.service
            .handle_message(
                self.id,
                ClientMessage::Join {
                    room: RoomId::from(room),
                    user: UserId::from(user),
                },
            )
            .await;
    }

    pub async fn leave(&self) {
        self.service
            .handle_message(self.id, ClientMessage::Leave)
            .await;
    }

    pub async fn send(&self, message: ClientMessage) {
        self.service.handle_message(self.id, message).await;
    }

    /// Raw text frame, exercising the parse path the socket handler uses.
    pub async fn send_frame(&self, text: &str) {
        self.service.handle_frame(self.id, text).await;
    }

    pub fn disconnect(&self) {
        self.service.disconnect(self.id);
    }

    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.rx.try_recv().ok()
    }

    /// Everything delivered so far.
    pub fn drain(&mut self) -> Vec<ServerMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    pub async fn expect_message(&mut self) -> ServerMessage {
        tokio::time::timeout(Duration::from_millis(500), self.rx.recv())
            .await
            .expect("timed out waiting for a message")
            .expect("outbound channel closed")
    }

    pub fn expect_silence(&mut self) {
        let pending = self.try_recv();
        assert!(pending.is_none(), "expected no pending messages, got {pending:?}");
    }
}
