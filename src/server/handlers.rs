use crate::model::{SearchError, SearchRequest, SearchResponse};
use crate::scraper::SourceInfo;
use crate::server::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

pub enum ApiError {
    BadRequest(String),
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error while processing the search".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Validation(v) => ApiError::BadRequest(v.to_string()),
            SearchError::Internal(detail) => {
                error!("Search failed: {}", detail);
                ApiError::Internal
            }
        }
    }
}

pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("Rejected search body: {}", e);
        ApiError::BadRequest("invalid request format".to_string())
    })?;

    let results = state.coordinator.run(&request).await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn search_status() -> Json<serde_json::Value> {
    Json(json!({ "message": "search API is up, POST a search to /api/search" }))
}

pub async fn list_sources(State(state): State<AppState>) -> Json<Vec<SourceInfo>> {
    Json(state.coordinator.registry().catalogue())
}
