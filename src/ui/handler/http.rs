//! HTTP API endpoint handlers.
//!
//! Read-only observability over the room directory. These snapshots are for
//! debugging and dashboards; relay decisions never go through them.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{PeerId, RoomId},
    infrastructure::dto::http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto},
    time::timestamp_to_rfc3339,
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of currently connected peer identities
pub async fn get_peers(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let mut peers = state.registry.connected_peers().await;
    peers.sort();

    Json(peers.into_iter().map(PeerId::into_string).collect())
}

/// Get list of live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.directory.rooms().await;

    let summaries = rooms
        .iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|m| m.id.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::try_from(room_id).map_err(|_| StatusCode::NOT_FOUND)?;

    // Rooms only exist while non-empty, so absence simply means 404
    let room = state
        .directory
        .get_room(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    let room_detail = RoomDetailDto {
        id: room.id.as_str().to_string(),
        members: room
            .members
            .iter()
            .map(|m| MemberDetailDto {
                peer_id: m.id.as_str().to_string(),
                joined_at: timestamp_to_rfc3339(m.joined_at.value()),
            })
            .collect(),
        created_at: timestamp_to_rfc3339(room.created_at.value()),
    };

    Ok(Json(room_detail))
}
