//! HTTP routes for the exercise query service.
//!
//! Query failures are not HTTP errors: they are rendered with status 200 as
//! `{"error": "<message>"}`, and an empty search as `{"message": "No matching records found."}`.
//! A query string that does not deserialize is a 422 with `{"detail": "<reason>"}`.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::error::QueryError;
use crate::table::{ExerciseTable, MuscleGroups, SearchOutcome};

pub const WELCOME_MESSAGE: &str = "Welcome to the Exercise Search API";
pub const NO_MATCHES_MESSAGE: &str = "No matching records found.";

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ExerciseTable>,
}

impl AppState {
    pub fn new(table: ExerciseTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

/// Query parameters for `/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Column to search in (e.g. `Exercise Name`, `Target_Muscles`).
    pub column: String,
    /// Value to search for.
    pub value: String,
}

/// Query parameters for the per-muscle sampling routes.
#[derive(Debug, Deserialize)]
pub struct MuscleQuery {
    pub muscle: Option<String>,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        Json(json!({ "error": self.to_string() })).into_response()
    }
}

/// Handler failure: either the request itself was malformed or the query over the table failed.
#[derive(Debug)]
pub enum ApiError {
    InvalidParams(QueryRejection),
    Query(QueryError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidParams(rejection)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidParams(rejection) => {
                let detail = rejection.body_text();
                tracing::debug!(%detail, "rejected query string");
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Query(err) => err.into_response(),
        }
    }
}

/// Build the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/search", get(search))
        .route("/six_exercises_per_muscle", get(six_exercises_per_muscle))
        .route("/one_exercise_per_muscle", get(one_exercise_per_muscle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /
async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// GET /search?column=..&value=..
async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let outcome = state.table.search(&params.column, &params.value)?;
    Ok(match outcome {
        SearchOutcome::Matches(rows) => {
            tracing::debug!(column = %params.column, matches = rows.row_count(), "search");
            Json(rows).into_response()
        }
        SearchOutcome::NoMatches => Json(json!({ "message": NO_MATCHES_MESSAGE })).into_response(),
    })
}

/// GET /six_exercises_per_muscle[?muscle=..]
async fn six_exercises_per_muscle(
    State(state): State<AppState>,
    params: Result<Query<MuscleQuery>, QueryRejection>,
) -> Result<Json<MuscleGroups>, ApiError> {
    let Query(params) = params?;
    let groups = state
        .table
        .sample_six(params.muscle.as_deref(), &mut rand::thread_rng())?;
    Ok(Json(groups))
}

/// GET /one_exercise_per_muscle[?muscle=..]
async fn one_exercise_per_muscle(
    State(state): State<AppState>,
    params: Result<Query<MuscleQuery>, QueryRejection>,
) -> Result<Json<MuscleGroups>, ApiError> {
    let Query(params) = params?;
    let groups = state
        .table
        .sample_one(params.muscle.as_deref(), &mut rand::thread_rng())?;
    Ok(Json(groups))
}
