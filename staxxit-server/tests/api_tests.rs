//! Integration tests for staxxit-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use staxxit_server::{create_router, ServerConfig, ServerState};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::new());
    create_router(&config, state)
}

async fn get(app: &axum::Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post(app: &axum::Router, uri: &str, body: Option<Value>) -> Value {
    let request = match body {
        Some(value) => Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let json = get(&app, "/api/status").await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "rust");
}

#[tokio::test]
async fn test_board_endpoint() {
    let app = test_app();
    let json = get(&app, "/api/board").await;

    assert_eq!(json["innerRadius"], 5);
    assert_eq!(json["outerRadius"], 6);
    assert_eq!(json["innerCells"].as_array().unwrap().len(), 91);
    assert_eq!(json["directions"].as_array().unwrap().len(), 6);

    let ring = json["outerColors"].as_array().unwrap();
    assert_eq!(ring.len(), 36);
    let both = ring.iter().filter(|c| c["color"] == "both").count();
    assert_eq!(both, 6);
}

#[tokio::test]
async fn test_unknown_room() {
    let app = test_app();
    let json = get(&app, "/api/room/NOPE42/state").await;
    assert_eq!(json["error"], "unknown room");
}

#[tokio::test]
async fn test_create_join_and_place() {
    let app = test_app();

    let created = post(&app, "/api/room", None).await;
    let room_id = created["roomId"].as_str().unwrap().to_string();
    let white_id = created["playerId"].as_str().unwrap().to_string();
    assert_eq!(created["color"], "W");
    assert_eq!(room_id.len(), 6);

    let joined = post(&app, &format!("/api/room/{room_id}/join"), None).await;
    let black_id = joined["playerId"].as_str().unwrap().to_string();
    assert_eq!(joined["color"], "B");

    // A third seat does not exist
    let full = post(&app, &format!("/api/room/{room_id}/join"), None).await;
    assert_eq!(full["error"], "room is full");

    // Black may not open; White must take the origin
    let rejected = post(
        &app,
        &format!("/api/room/{room_id}/move"),
        Some(json!({
            "playerId": black_id,
            "action": { "kind": "place", "pos": { "q": 1, "r": 0 } },
        })),
    )
    .await;
    assert_eq!(rejected["accepted"], false);

    let opened = post(
        &app,
        &format!("/api/room/{room_id}/move"),
        Some(json!({
            "playerId": white_id,
            "action": { "kind": "place", "pos": { "q": 0, "r": 0 } },
        })),
    )
    .await;
    assert_eq!(opened["accepted"], true);
    assert_eq!(opened["state"]["currentPlayer"], "B");
    assert_eq!(opened["state"]["piecesLeft"]["W"], 17);
    assert_eq!(opened["state"]["lastAction"]["type"], "place");
    assert!(opened.get("outcome").is_none());

    // Black answers next to the origin
    let reply = post(
        &app,
        &format!("/api/room/{room_id}/move"),
        Some(json!({
            "playerId": black_id,
            "action": { "kind": "place", "pos": { "q": 1, "r": -1 } },
        })),
    )
    .await;
    assert_eq!(reply["accepted"], true);
    assert_eq!(reply["state"]["cells"].as_array().unwrap().len(), 2);

    // The room state reflects both moves
    let state = get(&app, &format!("/api/room/{room_id}/state")).await;
    assert_eq!(state["players"], 2);
    assert_eq!(state["state"]["currentPlayer"], "W");
}

#[tokio::test]
async fn test_rejected_move_bumps_no_version() {
    let app = test_app();

    let created = post(&app, "/api/room", None).await;
    let room_id = created["roomId"].as_str().unwrap().to_string();
    let white_id = created["playerId"].as_str().unwrap().to_string();

    let before = get(&app, &format!("/api/room/{room_id}/state")).await;
    let version = before["version"].as_u64().unwrap();

    let rejected = post(
        &app,
        &format!("/api/room/{room_id}/move"),
        Some(json!({
            "playerId": white_id,
            "action": { "kind": "place", "pos": { "q": 3, "r": 3 } },
        })),
    )
    .await;
    assert_eq!(rejected["accepted"], false);

    let after = get(&app, &format!("/api/room/{room_id}/state")).await;
    assert_eq!(after["version"].as_u64().unwrap(), version);
}

#[tokio::test]
async fn test_leave_tears_down_empty_room() {
    let app = test_app();

    let created = post(&app, "/api/room", None).await;
    let room_id = created["roomId"].as_str().unwrap().to_string();
    let white_id = created["playerId"].as_str().unwrap().to_string();

    let left = post(
        &app,
        &format!("/api/room/{room_id}/leave"),
        Some(json!({ "playerId": white_id })),
    )
    .await;
    assert_eq!(left["left"], true);
    assert_eq!(left["roomClosed"], true);

    let gone = get(&app, &format!("/api/room/{room_id}/state")).await;
    assert_eq!(gone["error"], "unknown room");
}
