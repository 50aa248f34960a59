use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use chess_place_core::BoardSet;

use super::run_search;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct PublishRequest {
    pub pieces: Vec<String>,
    pub columns: Option<i32>,
    pub rows: Option<i32>,
}

#[derive(Serialize)]
pub struct PublishResponse {
    pub channel: String,
    pub boards: usize,
    pub receivers: usize,
}

pub async fn publish(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(req): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    let (boards, _) = run_search(&state, req.pieces, req.columns, req.rows).await?;
    let receivers = state.broker.publisher(&name).publish(&boards)?;
    info!(channel = %name, boards = boards.len(), receivers, "published board set");

    Ok(Json(PublishResponse {
        channel: name,
        boards: boards.len(),
        receivers,
    }))
}

pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<PublishResponse> {
    let receivers = state.broker.publisher(&name).close();
    info!(channel = %name, receivers, "sent end of stream");

    Json(PublishResponse {
        channel: name,
        boards: 0,
        receivers,
    })
}

pub async fn latest(State(state): State<Arc<AppState>>) -> Result<Json<BoardSet>, StatusCode> {
    state.latest().map(Json).ok_or(StatusCode::NOT_FOUND)
}
