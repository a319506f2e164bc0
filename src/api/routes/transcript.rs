//! Transcript ingestion endpoint (POST /transcript).

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{ProcessOutcome, TranscriptInput};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/transcript", post(add_transcript))
        .with_state(state)
}

/// Runs the analyzers on the entry and returns the new suggestions together
/// with the updated meeting state.
async fn add_transcript(
    State(state): State<AppState>,
    Json(input): Json<TranscriptInput>,
) -> ApiResult<Json<ProcessOutcome>> {
    if input.speaker.trim().is_empty() || input.text.trim().is_empty() {
        return Err(ApiError::bad_request("Both speaker and text are required"));
    }

    let assistant = state.meeting.require().await?;
    let outcome = assistant.process_transcript(input.into()).await;
    Ok(Json(outcome))
}
