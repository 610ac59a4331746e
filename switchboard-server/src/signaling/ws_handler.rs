use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use switchboard_core::{ConnectionId, ServerMessage, UserId};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// WebSocket entry point. The client proposes its connection identifier
/// in the path; a malformed one is refused before any state exists.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(connection_id): Path<String>,
    State(service): State<SignalingService>,
) -> Response {
    let Ok(connection_id) = connection_id.parse::<ConnectionId>() else {
        return (StatusCode::BAD_REQUEST, "connection id must be a uuid").into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(socket, connection_id, service))
}

async fn handle_socket(socket: WebSocket, connection_id: ConnectionId, service: SignalingService) {
    info!("new WebSocket connection: {connection_id}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // the connection id doubles as the provisional display identity
    // until the join payload supplies the real one
    let user = UserId::from(connection_id.to_string());
    if let Err(err) = service.attach(connection_id, user, tx) {
        warn!("rejecting connection {connection_id}: {err}");
        if let Ok(frame) = serde_json::to_string(&err.to_message()) {
            let _ = sender.send(Message::Text(frame.into())).await;
        }
        let _ = sender.close().await;
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let frame = match serde_json::to_string(&message) {
                Ok(frame) => frame,
                Err(err) => {
                    error!("failed to serialize outbound frame: {err}");
                    continue;
                }
            };
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => service.handle_frame(connection_id, &text).await,
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.disconnect(connection_id);
    info!("WebSocket disconnected: {connection_id}");
}
