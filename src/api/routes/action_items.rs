//! Action item endpoints.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{ActionItem, ActionItemUpdate};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/action-items", get(list_action_items))
        .route("/action-items/:id", patch(update_action_item))
        .with_state(state)
}

async fn list_action_items(State(state): State<AppState>) -> ApiResult<Json<Vec<ActionItem>>> {
    let assistant = state.meeting.require().await?;
    Ok(Json(assistant.snapshot().await.action_items))
}

/// PATCH /action-items/:id - Overwrite the fields present in the body.
async fn update_action_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ActionItemUpdate>,
) -> ApiResult<Json<ActionItem>> {
    let assistant = state.meeting.require().await?;
    if !assistant.update_action_item(&id, update).await {
        return Err(ApiError::not_found(format!("Action item {} not found", id)));
    }

    assistant
        .snapshot()
        .await
        .action_items
        .into_iter()
        .find(|item| item.id == id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Action item {} not found", id)))
}
