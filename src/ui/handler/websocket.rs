//! WebSocket connection handlers: the session gateway.
//!
//! Owns the per-connection lifecycle (`connected` -> `in room` ->
//! `connected`/`disconnected`) and sequences the room directory and the
//! relay under concurrent client actions. Every inbound event is handled
//! independently: malformed or stale messages are logged and dropped, and
//! never take the connection (or any other connection) down.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{PeerId, RoomId},
    infrastructure::dto::websocket::{ClientMessage, PeerInfo, ServerMessage},
    ui::state::{AppState, ConnectQuery},
    usecase::{
        ConnectPeerUseCase, DisconnectPeerUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        RelaySignalUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let peer_id_str = query.peer_id;

    // Convert String -> PeerId (Domain Model)
    let peer_id = match PeerId::try_from(peer_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid peer_id format: '{}'", peer_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this peer to receive relayed messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Bind the identity before upgrading; it is fixed for the connection's
    // lifetime and later join-room claims are validated against it.
    let connect_usecase = ConnectPeerUseCase::new(state.registry.clone());

    match connect_usecase.execute(peer_id.clone(), tx).await {
        Ok(_) => {
            tracing::info!("Peer '{}' connected and registered", peer_id_str);
            Ok(ws.on_upgrade(|socket| handle_socket(socket, state, peer_id, rx)))
        }
        Err(crate::usecase::ConnectError::DuplicateIdentity(_)) => {
            tracing::warn!(
                "Peer with ID '{}' is already connected. Rejecting connection.",
                peer_id_str
            );
            Err(StatusCode::CONFLICT)
        }
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    peer_id: PeerId,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    let peer_id_clone = peer_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive signaling events from this peer
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_message(&state_clone, &peer_id_clone, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Peer '{}' requested close", peer_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed messages to this peer
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Transport close is an implicit leave for whatever room is current.
    // This is the only cleanup path and it runs exactly once per connection.
    let disconnect_usecase =
        DisconnectPeerUseCase::new(state.registry.clone(), state.directory.clone());

    match disconnect_usecase.execute(&peer_id).await {
        Some((room_id, remaining)) => {
            tracing::info!(
                "Peer '{}' disconnected; left room '{}'",
                peer_id,
                room_id
            );
            let left_msg = ServerMessage::UserDisconnected {
                peer_id: peer_id.to_string(),
            };
            deliver_to_each(&state, &remaining, &left_msg).await;
        }
        None => {
            tracing::info!("Peer '{}' disconnected (no room)", peer_id);
        }
    }
}

/// Dispatch one inbound signaling event.
///
/// Failures are scoped to the event: they are logged and the event is
/// dropped, per the tolerant policy for a lossy control channel.
async fn handle_client_message(state: &Arc<AppState>, bound_peer_id: &PeerId, text: &str) {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse signaling message as JSON: {}", e);
            return;
        }
    };

    match msg {
        ClientMessage::JoinRoom { room_id, peer_id } => {
            handle_join_room(state, bound_peer_id, room_id, peer_id).await;
        }
        ClientMessage::Offer {
            room_id,
            sdp,
            target_id,
        } => {
            let build = |from_id: String, target_id: String| ServerMessage::Offer {
                sdp,
                from_id,
                target_id,
            };
            handle_direct_signal(state, bound_peer_id, room_id, target_id, build).await;
        }
        ClientMessage::Answer {
            room_id,
            sdp,
            target_id,
        } => {
            let build = |from_id: String, target_id: String| ServerMessage::Answer {
                sdp,
                from_id,
                target_id,
            };
            handle_direct_signal(state, bound_peer_id, room_id, target_id, build).await;
        }
        ClientMessage::IceCandidate {
            room_id,
            candidate,
            target_id,
        } => {
            let build = |from_id: String, target_id: String| ServerMessage::IceCandidate {
                candidate,
                from_id,
                target_id,
            };
            handle_direct_signal(state, bound_peer_id, room_id, target_id, build).await;
        }
        ClientMessage::ToggleAudio {
            room_id,
            peer_id,
            enabled,
        } => {
            let msg = ServerMessage::UserAudioToggled {
                peer_id: peer_id.clone(),
                enabled,
            };
            handle_room_broadcast(state, bound_peer_id, room_id, peer_id, msg).await;
        }
        ClientMessage::ToggleVideo {
            room_id,
            peer_id,
            enabled,
        } => {
            let msg = ServerMessage::UserVideoToggled {
                peer_id: peer_id.clone(),
                enabled,
            };
            handle_room_broadcast(state, bound_peer_id, room_id, peer_id, msg).await;
        }
        ClientMessage::LeaveRoom { room_id, peer_id } => {
            handle_leave_room(state, bound_peer_id, room_id, peer_id).await;
        }
    }
}

async fn handle_join_room(
    state: &Arc<AppState>,
    bound_peer_id: &PeerId,
    room_id: String,
    claimed_peer_id: String,
) {
    let Some(room_id) = parse_room_id(&room_id) else {
        return;
    };
    if !claim_matches(bound_peer_id, &claimed_peer_id) {
        return;
    }

    let join_usecase = JoinRoomUseCase::new(state.registry.clone(), state.directory.clone());
    let outcome = join_usecase
        .execute(bound_peer_id.clone(), room_id.clone())
        .await;

    // Joining while in another room runs that room's leave sequence first
    if let Some((previous_room, remaining)) = &outcome.left_previous {
        tracing::info!(
            "Peer '{}' implicitly left room '{}' by joining '{}'",
            bound_peer_id,
            previous_room,
            room_id
        );
        let left_msg = ServerMessage::UserDisconnected {
            peer_id: bound_peer_id.to_string(),
        };
        deliver_to_each(state, remaining, &left_msg).await;
    }

    // Ack with the pre-join snapshot so the joiner knows who is present
    let joined_msg = ServerMessage::RoomJoined {
        room_id: room_id.to_string(),
        peers: outcome
            .prior_members
            .iter()
            .map(|id| PeerInfo {
                peer_id: id.to_string(),
            })
            .collect(),
    };
    deliver_to_one(state, bound_peer_id, &joined_msg).await;

    // Each prior member receiving user-connected creates its own offer to
    // the newcomer (full-mesh topology). Duplicate joins stay silent so
    // nobody re-negotiates.
    if outcome.newly_joined {
        tracing::info!("Peer '{}' joined room '{}'", bound_peer_id, room_id);
        let connected_msg = ServerMessage::UserConnected {
            peer_id: bound_peer_id.to_string(),
        };
        deliver_to_each(state, &outcome.prior_members, &connected_msg).await;
    }
}

async fn handle_direct_signal<F>(
    state: &Arc<AppState>,
    bound_peer_id: &PeerId,
    room_id: String,
    target_id: String,
    build: F,
) where
    F: FnOnce(String, String) -> ServerMessage,
{
    let Some(room_id) = parse_room_id(&room_id) else {
        return;
    };
    let Ok(target_id) = PeerId::try_from(target_id) else {
        tracing::warn!("Invalid target_id in signaling message from '{}'", bound_peer_id);
        return;
    };
    if !in_room(state, bound_peer_id, &room_id).await {
        return;
    }

    let relay_usecase = RelaySignalUseCase::new(state.directory.clone());
    match relay_usecase.direct_target(&room_id, &target_id).await {
        Some(target) => {
            let msg = build(bound_peer_id.to_string(), target.to_string());
            deliver_to_one(state, &target, &msg).await;
        }
        None => {
            // The target raced a leave with this message; the sender will
            // see the leave notification and tear down that peer itself.
            tracing::debug!(
                "Dropped signal from '{}' to '{}': target not in room '{}'",
                bound_peer_id,
                target_id,
                room_id
            );
        }
    }
}

async fn handle_room_broadcast(
    state: &Arc<AppState>,
    bound_peer_id: &PeerId,
    room_id: String,
    claimed_peer_id: String,
    msg: ServerMessage,
) {
    let Some(room_id) = parse_room_id(&room_id) else {
        return;
    };
    if !claim_matches(bound_peer_id, &claimed_peer_id) {
        return;
    }
    if !in_room(state, bound_peer_id, &room_id).await {
        return;
    }

    let relay_usecase = RelaySignalUseCase::new(state.directory.clone());
    let targets = relay_usecase
        .broadcast_targets(&room_id, bound_peer_id)
        .await;
    deliver_to_each(state, &targets, &msg).await;
}

async fn handle_leave_room(
    state: &Arc<AppState>,
    bound_peer_id: &PeerId,
    room_id: String,
    claimed_peer_id: String,
) {
    let Some(room_id) = parse_room_id(&room_id) else {
        return;
    };
    if !claim_matches(bound_peer_id, &claimed_peer_id) {
        return;
    }

    let leave_usecase = LeaveRoomUseCase::new(state.registry.clone(), state.directory.clone());
    match leave_usecase.execute(bound_peer_id, &room_id).await {
        Some(remaining) => {
            tracing::info!("Peer '{}' left room '{}'", bound_peer_id, room_id);
            let left_msg = ServerMessage::UserDisconnected {
                peer_id: bound_peer_id.to_string(),
            };
            deliver_to_each(state, &remaining, &left_msg).await;
        }
        None => {
            // Replayed or reordered leave; nothing to announce
            tracing::debug!(
                "Ignored leave from '{}' for room '{}': not a member",
                bound_peer_id,
                room_id
            );
        }
    }
}

fn parse_room_id(room_id: &str) -> Option<RoomId> {
    match RoomId::try_from(room_id.to_string()) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("Invalid room_id format: '{}'", room_id);
            None
        }
    }
}

/// The source protocol trusted whatever identity a client put in its
/// join/toggle payloads. Here the identity bound at handshake time is
/// authoritative and mismatched claims are dropped.
fn claim_matches(bound_peer_id: &PeerId, claimed_peer_id: &str) -> bool {
    if bound_peer_id.as_str() == claimed_peer_id {
        return true;
    }
    tracing::warn!(
        "Dropped message: claimed identity '{}' does not match bound identity '{}'",
        claimed_peer_id,
        bound_peer_id
    );
    false
}

/// Signaling messages are accepted only while the connection is in the
/// stated room; anything arriving after a leave is dropped without error.
async fn in_room(state: &Arc<AppState>, peer_id: &PeerId, room_id: &RoomId) -> bool {
    if state.registry.current_room(peer_id).await.as_ref() == Some(room_id) {
        return true;
    }
    tracing::debug!(
        "Dropped message from '{}': not in room '{}'",
        peer_id,
        room_id
    );
    false
}

async fn deliver_to_one(state: &Arc<AppState>, target_id: &PeerId, msg: &ServerMessage) {
    let json = serde_json::to_string(msg).unwrap();
    match state.registry.sender(target_id).await {
        Some(sender) => {
            if sender.send(json).is_err() {
                tracing::warn!("Failed to send message to peer '{}'", target_id);
            }
        }
        None => {
            tracing::debug!("No live connection for peer '{}'", target_id);
        }
    }
}

async fn deliver_to_each(state: &Arc<AppState>, target_ids: &[PeerId], msg: &ServerMessage) {
    for target_id in target_ids {
        deliver_to_one(state, target_id, msg).await;
    }
}
