//! Agenda endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Router,
};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{AgendaInput, AgendaItem};

#[derive(Debug, Deserialize)]
pub struct CurrentAgendaRequest {
    pub index: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/agenda", post(add_agenda_item))
        .route("/agenda/current", put(set_current))
        .with_state(state)
}

async fn add_agenda_item(
    State(state): State<AppState>,
    Json(input): Json<AgendaInput>,
) -> ApiResult<(StatusCode, Json<AgendaItem>)> {
    if input.title.trim().is_empty() {
        return Err(ApiError::bad_request("Agenda item title is required"));
    }

    let assistant = state.meeting.require().await?;
    let item = AgendaItem::from(input);
    assistant.add_agenda_item(item.clone()).await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /agenda/current - Move the meeting to another agenda item.
async fn set_current(
    State(state): State<AppState>,
    Json(request): Json<CurrentAgendaRequest>,
) -> ApiResult<Json<AgendaItem>> {
    let assistant = state.meeting.require().await?;
    if !assistant.update_agenda_item(request.index).await {
        return Err(ApiError::not_found(format!(
            "Agenda item {} not found",
            request.index
        )));
    }

    assistant
        .snapshot()
        .await
        .current_agenda()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Agenda item {} not found", request.index)))
}
