//! State shared by all API handlers.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::error::{ApiError, ApiResult};
use crate::insight::InsightProvider;
use crate::meeting::{AssistantSettings, MeetingAssistant, MeetingSetup};

/// Slot holding the meeting currently served by the API, if any.
#[derive(Clone, Default)]
pub struct ActiveMeeting {
    inner: Arc<RwLock<Option<Arc<MeetingAssistant>>>>,
}

impl ActiveMeeting {
    pub async fn get(&self) -> Option<Arc<MeetingAssistant>> {
        self.inner.read().await.clone()
    }

    /// The current meeting, or a 404.
    pub async fn require(&self) -> ApiResult<Arc<MeetingAssistant>> {
        self.get().await.ok_or_else(ApiError::no_meeting)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub meeting: ActiveMeeting,
    pub insight: Arc<dyn InsightProvider>,
    pub settings: AssistantSettings,
}

impl AppState {
    pub fn new(insight: Arc<dyn InsightProvider>, settings: AssistantSettings) -> Self {
        Self {
            meeting: ActiveMeeting::default(),
            insight,
            settings,
        }
    }

    /// Replace the slot with a fresh meeting. Fails while the current
    /// meeting is still active.
    pub async fn start_meeting(&self, setup: MeetingSetup) -> ApiResult<Arc<MeetingAssistant>> {
        let mut slot = self.meeting.inner.write().await;

        if let Some(current) = slot.as_ref() {
            let state = current.snapshot().await;
            if state.is_active {
                return Err(ApiError::conflict(format!(
                    "Meeting \"{}\" is still in progress. End it first.",
                    state.title
                )));
            }
            info!("Replacing ended meeting {}", state.id);
        }

        let assistant = Arc::new(MeetingAssistant::new(
            setup.into_state(Utc::now()),
            self.insight.clone(),
            self.settings.clone(),
        )?);
        *slot = Some(assistant.clone());

        Ok(assistant)
    }
}
