//! REST API server for the meeting facilitator.
//!
//! Provides HTTP endpoints for:
//! - Meeting lifecycle (start, state, end, summary)
//! - Transcript ingestion
//! - Suggestions and acknowledgments
//! - Decisions, action items and agenda progress

pub mod error;
pub mod routes;
pub mod state;

use anyhow::{Context, Result};
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tracing::info;

pub use state::{ActiveMeeting, AppState};

/// Full router over `state`. Exposed so tests can drive it without a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .merge(routes::meeting::router(state.clone()))
        .merge(routes::transcript::router(state.clone()))
        .merge(routes::suggestions::router(state.clone()))
        .merge(routes::decisions::router(state.clone()))
        .merge(routes::action_items::router(state.clone()))
        .merge(routes::agenda::router(state))
}

pub struct ApiServer {
    host: String,
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(host: impl Into<String>, port: u16, state: AppState) -> Self {
        Self {
            host: host.into(),
            port,
            state,
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = router(self.state);
        let addr = format!("{}:{}", self.host, self.port);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind API server to {}", addr))?;

        info!("API server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET   /                           - Service info");
        info!("  POST  /meeting                    - Start a meeting");
        info!("  GET   /meeting                    - Current meeting state");
        info!("  POST  /meeting/end                - End the meeting");
        info!("  GET   /meeting/summary            - Meeting summary (?format=text)");
        info!("  POST  /transcript                 - Add a transcript entry");
        info!("  GET   /suggestions                - List suggestions (?type=)");
        info!("  POST  /suggestions/:id/acknowledge - Acknowledge a suggestion");
        info!("  POST  /decisions                  - Record a decision");
        info!("  GET   /action-items               - List action items");
        info!("  PATCH /action-items/:id           - Update an action item");
        info!("  POST  /agenda                     - Add an agenda item");
        info!("  PUT   /agenda/current             - Move to an agenda item");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "service": "facilitator",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
