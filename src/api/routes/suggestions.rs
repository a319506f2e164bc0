//! Suggestion endpoints.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{Suggestion, SuggestionType};

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/suggestions", get(list_suggestions))
        .route("/suggestions/:id/acknowledge", post(acknowledge))
        .with_state(state)
}

/// GET /suggestions - Newest first, optionally filtered by `?type=`.
async fn list_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> ApiResult<Json<Vec<Suggestion>>> {
    let kind = match query.kind.as_deref() {
        Some(raw) => Some(
            SuggestionType::parse(raw)
                .ok_or_else(|| ApiError::bad_request(format!("Unknown suggestion type: {}", raw)))?,
        ),
        None => None,
    };

    let assistant = state.meeting.require().await?;
    let meeting = assistant.snapshot().await;
    let suggestions = meeting
        .suggestions_newest_first()
        .into_iter()
        .filter(|s| kind.map_or(true, |k| s.kind == k))
        .cloned()
        .collect();

    Ok(Json(suggestions))
}

async fn acknowledge(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let assistant = state.meeting.require().await?;
    if !assistant.acknowledge_suggestion(&id).await {
        return Err(ApiError::not_found(format!("Suggestion {} not found", id)));
    }

    Ok(Json(json!({ "success": true, "id": id })))
}
