use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Song, SongId, UserRatings},
    services::{discovery::discovery_feed, RecommendError, RecommendationMethod},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub songs: usize,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub ratings: UserRatings,
    /// One of preference, similarity or hybrid; hybrid when absent
    pub method: Option<String>,
    /// Number of songs to return
    pub n: Option<i64>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            songs: state.catalog().len(),
        }),
    )
}

/// Get the full catalog, in catalog order
pub async fn list_songs(State(state): State<AppState>) -> Json<Vec<Song>> {
    Json(state.catalog().songs().to_vec())
}

/// Get a single song by id
pub async fn get_song(
    State(state): State<AppState>,
    path: Result<Path<SongId>, PathRejection>,
) -> AppResult<Json<Song>> {
    let Path(id) = path?;
    state
        .catalog()
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Song {} not found", id)))
}

/// Get a shuffled mix of spotlight and other artists for the user to rate
pub async fn discover(State(state): State<AppState>) -> Json<Vec<Song>> {
    let feed = discovery_feed(
        state.catalog(),
        &state.config.spotlight_artists,
        state.config.discovery_per_group,
        &mut rand::thread_rng(),
    );
    Json(feed)
}

/// Recommend songs from the user's ratings
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<Vec<Song>>> {
    let Json(request) = payload?;

    let method = match request.method.as_deref() {
        Some(name) => name.parse::<RecommendationMethod>()?,
        None => RecommendationMethod::default(),
    };

    let n = match request.n {
        None => state.config.default_recommendations,
        Some(n) if n <= 0 => return Err(RecommendError::InvalidCount.into()),
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    };

    if n > state.config.max_recommendations {
        return Err(AppError::InvalidInput(format!(
            "At most {} recommendations can be requested",
            state.config.max_recommendations
        )));
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        ratings = request.ratings.len(),
        n,
        "Processing recommendation request"
    );

    let songs = state.engine.recommend(&request.ratings, method, n)?;

    tracing::info!(
        request_id = %request_id,
        returned = songs.len(),
        "Recommendations completed"
    );

    Ok(Json(songs))
}
