//! Room lifecycle and move handling
//!
//! Creating a room seats White and returns the join code; joining seats
//! Black. Moves carry the per-seat player id; the engine validates turn
//! ownership and legality, and a declined action leaves the room
//! untouched (no version bump, so pollers see nothing).

use crate::state::{generate_player_id, generate_room_id, Room, ServerState};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use staxxit_core::{Action, Player};
use std::sync::Arc;
use std::time::Duration;

fn unknown_room() -> Json<Value> {
    Json(json!({ "error": "unknown room" }))
}

/// Open a room and take the White seat
pub async fn create_room(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let mut rooms = state.rooms.write().unwrap();
    let mut room_id = generate_room_id();
    while rooms.contains_key(&room_id) {
        room_id = generate_room_id();
    }

    let player_id = generate_player_id();
    let mut room = Room::new();
    room.seats.insert(player_id.clone(), Player::White);
    rooms.insert(room_id.clone(), room);

    tracing::info!("room {} created", room_id);
    Json(json!({
        "roomId": room_id,
        "playerId": player_id,
        "color": Player::White,
    }))
}

/// Take the Black seat in an existing room
pub async fn join_room(
    State(state): State<Arc<ServerState>>,
    Path(room_id): Path<String>,
) -> Json<Value> {
    let mut rooms = state.rooms.write().unwrap();
    let Some(room) = rooms.get_mut(&room_id) else {
        return unknown_room();
    };
    if room.is_full() {
        return Json(json!({ "error": "room is full" }));
    }

    let player_id = generate_player_id();
    room.seats.insert(player_id.clone(), Player::Black);
    room.version += 1;

    tracing::info!("room {} joined", room_id);
    Json(json!({
        "playerId": player_id,
        "color": Player::Black,
    }))
}

/// Current match state
pub async fn room_state(
    State(state): State<Arc<ServerState>>,
    Path(room_id): Path<String>,
) -> Json<Value> {
    let rooms = state.rooms.read().unwrap();
    match rooms.get(&room_id) {
        Some(room) => Json(json!({
            "version": room.version,
            "players": room.seats.len(),
            "state": room.game.snapshot(),
        })),
        None => unknown_room(),
    }
}

#[derive(Deserialize)]
pub struct PollParams {
    pub version: Option<u64>,
}

/// Long-poll for room updates
pub async fn poll_room(
    State(state): State<Arc<ServerState>>,
    Path(room_id): Path<String>,
    Query(params): Query<PollParams>,
) -> Json<Value> {
    let client_version = params.version.unwrap_or(0);

    // Check up to 50 times (5 seconds) for updates
    for _ in 0..50 {
        {
            let rooms = state.rooms.read().unwrap();
            match rooms.get(&room_id) {
                Some(room) if room.version != client_version => {
                    return Json(json!({
                        "reload": true,
                        "version": room.version,
                        "players": room.seats.len(),
                        "state": room.game.snapshot(),
                    }));
                }
                Some(_) => {}
                None => return unknown_room(),
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let rooms = state.rooms.read().unwrap();
    match rooms.get(&room_id) {
        Some(room) => Json(json!({ "reload": false, "version": room.version })),
        None => unknown_room(),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub player_id: String,
    pub action: Action,
}

/// Submit one action for the seat owning `player_id`
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(room_id): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Json<Value> {
    let mut rooms = state.rooms.write().unwrap();
    let Some(room) = rooms.get_mut(&room_id) else {
        return unknown_room();
    };
    let Some(color) = room.seat_of(&req.player_id) else {
        return Json(json!({ "error": "unknown player" }));
    };

    match room.game.apply_action(color, &req.action) {
        Some(applied) => {
            room.game = applied.state;
            room.version += 1;
            let mut body = json!({
                "accepted": true,
                "version": room.version,
                "state": room.game.snapshot(),
            });
            if let Some(outcome) = applied.outcome {
                tracing::info!("room {} ended, winner {:?}", room_id, outcome.winner);
                body["outcome"] = json!(outcome);
            }
            Json(body)
        }
        None => Json(json!({ "accepted": false })),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub player_id: String,
}

/// Give up a seat; the room is torn down when the last seat empties
pub async fn leave_room(
    State(state): State<Arc<ServerState>>,
    Path(room_id): Path<String>,
    Json(req): Json<LeaveRequest>,
) -> Json<Value> {
    let mut rooms = state.rooms.write().unwrap();
    let Some(room) = rooms.get_mut(&room_id) else {
        return unknown_room();
    };
    if room.seats.remove(&req.player_id).is_none() {
        return Json(json!({ "error": "unknown player" }));
    }
    room.version += 1;

    if room.seats.is_empty() {
        rooms.remove(&room_id);
        tracing::info!("room {} torn down", room_id);
        return Json(json!({ "left": true, "roomClosed": true }));
    }
    Json(json!({ "left": true, "roomClosed": false }))
}
