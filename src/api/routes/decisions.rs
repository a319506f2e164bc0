//! Decision recording endpoint (POST /decisions).

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{Decision, DecisionInput};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/decisions", post(add_decision))
        .with_state(state)
}

async fn add_decision(
    State(state): State<AppState>,
    Json(input): Json<DecisionInput>,
) -> ApiResult<(StatusCode, Json<Decision>)> {
    if input.title.trim().is_empty() {
        return Err(ApiError::bad_request("Decision title is required"));
    }

    let assistant = state.meeting.require().await?;
    let decision = Decision::from(input);
    assistant.add_decision(decision.clone()).await;

    Ok((StatusCode::CREATED, Json(decision)))
}
