use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use chess_place_core::search::RoundStats;
use chess_place_core::{BoardSet, Dimensions, Error, PlacementSearch, SearchStats};

use crate::error::ApiError;
use crate::AppState;

pub mod channels;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/place", get(place))
        .route("/channels/:name/publish", post(channels::publish))
        .route("/channels/:name/close", post(channels::close))
        .route("/boards/latest", get(channels::latest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Deserialize)]
pub struct PlaceQuery {
    /// Comma separated, e.g. `knight,pawn,king`
    pub pieces: String,
    pub columns: Option<i32>,
    pub rows: Option<i32>,
}

#[derive(Serialize)]
pub struct PlaceResponse {
    pub count: usize,
    pub rounds: Vec<RoundStats>,
    pub boards: BoardSet,
}

/// Runs a search on the blocking pool so the executor keeps serving requests.
pub async fn run_search(
    state: &AppState,
    pieces: Vec<String>,
    columns: Option<i32>,
    rows: Option<i32>,
) -> Result<(BoardSet, SearchStats), ApiError> {
    let dims = Dimensions::new(columns.unwrap_or(8), rows.unwrap_or(8))?;
    if dims.columns() > state.max_side || dims.rows() > state.max_side {
        return Err(Error::InvalidInput(format!(
            "board sides are limited to {}, got {}x{}",
            state.max_side,
            dims.columns(),
            dims.rows()
        ))
        .into());
    }
    let mut search = PlacementSearch::from_names(&pieces, dims)?;
    if let Some(limit) = state.board_limit {
        search = search.with_board_limit(limit);
    }

    let result = tokio::task::spawn_blocking(move || search.run_with_stats())
        .await
        .map_err(|e| ApiError::Internal(format!("Search task failed: {}", e)))??;
    Ok(result)
}

pub async fn place(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PlaceQuery>,
) -> Result<Json<PlaceResponse>, ApiError> {
    let pieces: Vec<String> = query
        .pieces
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    let (boards, stats) = run_search(&state, pieces, query.columns, query.rows).await?;

    Ok(Json(PlaceResponse {
        count: boards.len(),
        rounds: stats.rounds,
        boards,
    }))
}

pub async fn health() -> &'static str {
    "OK"
}
