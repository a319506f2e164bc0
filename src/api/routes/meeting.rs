//! Meeting lifecycle endpoints.
//!
//! - Starting a meeting (POST /meeting)
//! - Reading the current state (GET /meeting)
//! - Ending the meeting (POST /meeting/end)
//! - Generating the summary (GET /meeting/summary)

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::meeting::{MeetingSetup, MeetingState};

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub format: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/meeting", post(start_meeting).get(get_meeting))
        .route("/meeting/end", post(end_meeting))
        .route("/meeting/summary", get(get_summary))
        .with_state(state)
}

async fn start_meeting(
    State(state): State<AppState>,
    Json(setup): Json<MeetingSetup>,
) -> ApiResult<(StatusCode, Json<MeetingState>)> {
    if setup.title.trim().is_empty() {
        return Err(ApiError::bad_request("Meeting title is required"));
    }

    info!("Meeting start requested via API: {}", setup.title);
    let assistant = state.start_meeting(setup).await?;

    Ok((StatusCode::CREATED, Json(assistant.snapshot().await)))
}

async fn get_meeting(State(state): State<AppState>) -> ApiResult<Json<MeetingState>> {
    let assistant = state.meeting.require().await?;
    Ok(Json(assistant.snapshot().await))
}

async fn end_meeting(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let assistant = state.meeting.require().await?;
    let ended = assistant.end_meeting().await;

    Ok(Json(json!({
        "success": true,
        "message": if ended { "Meeting ended" } else { "Meeting had already ended" },
    })))
}

async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<Response> {
    let as_text = match query.format.as_deref() {
        None | Some("json") => false,
        Some("text") => true,
        Some(other) => {
            return Err(ApiError::bad_request(format!(
                "Unknown summary format: {}",
                other
            )))
        }
    };

    let assistant = state.meeting.require().await?;
    let summary = assistant.generate_summary().await;

    if as_text {
        return Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            summary.to_text(),
        )
            .into_response());
    }

    Ok(Json(summary).into_response())
}
