//! Shared handle over the canonical meeting state.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::types::{ActionItemUpdate, AgendaItem, Decision, MeetingState};

/// Thread-safe handle for sharing one meeting's state between the assistant
/// and API handlers. Clones point at the same state.
#[derive(Clone)]
pub struct MeetingStateHandle {
    inner: Arc<Mutex<MeetingState>>,
}

impl MeetingStateHandle {
    pub fn new(state: MeetingState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn snapshot(&self) -> MeetingState {
        self.inner.lock().await.clone()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, MeetingState> {
        self.inner.lock().await
    }

    /// Mark a suggestion acknowledged. Returns `false` for an unknown id.
    pub async fn acknowledge_suggestion(&self, id: &str) -> bool {
        let mut state = self.inner.lock().await;
        match state.suggestions.iter_mut().find(|s| s.id == id) {
            Some(suggestion) => {
                suggestion.is_acknowledged = true;
                true
            }
            None => {
                debug!("Acknowledge ignored, unknown suggestion {}", id);
                false
            }
        }
    }

    pub async fn add_decision(&self, decision: Decision) {
        let mut state = self.inner.lock().await;
        info!("Decision recorded: {}", decision.title);
        state.decisions.push(decision);
    }

    /// Overwrite the provided fields of one action item. Returns `false` for
    /// an unknown id.
    pub async fn update_action_item(&self, id: &str, update: ActionItemUpdate) -> bool {
        let mut state = self.inner.lock().await;
        match state.action_items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.apply(update);
                true
            }
            None => {
                debug!("Update ignored, unknown action item {}", id);
                false
            }
        }
    }

    /// Move to the agenda item at `index`. Returns `false` when the index is
    /// out of range.
    pub async fn update_agenda_item(&self, index: usize) -> bool {
        let mut state = self.inner.lock().await;
        if index >= state.agenda.len() {
            debug!(
                "Agenda index {} out of range ({} items)",
                index,
                state.agenda.len()
            );
            return false;
        }

        let now = Utc::now();
        let previous = state.current_agenda_item;
        if previous != index {
            if let Some(item) = state.agenda.get_mut(previous) {
                if item.start_time.is_some() && item.end_time.is_none() {
                    item.end_time = Some(now);
                }
            }
        }

        state.current_agenda_item = index;
        let item = &mut state.agenda[index];
        if item.start_time.is_none() {
            item.start_time = Some(now);
        }

        info!("Current agenda item: {} ({})", index, item.title);
        true
    }

    pub async fn add_agenda_item(&self, item: AgendaItem) {
        let mut state = self.inner.lock().await;
        state.agenda.push(item);
    }

    /// Stop accepting transcript entries. Returns `false` if the meeting had
    /// already ended.
    pub async fn end_meeting(&self) -> bool {
        let mut state = self.inner.lock().await;
        if !state.is_active {
            return false;
        }

        state.is_active = false;
        let current = state.current_agenda_item;
        if let Some(item) = state.agenda.get_mut(current) {
            if item.end_time.is_none() {
                item.end_time = Some(Utc::now());
            }
        }

        info!("Meeting {} ended", state.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{ActionItem, ActionStatus, Priority, Suggestion, SuggestionType};

    fn handle_with_agenda() -> MeetingStateHandle {
        let agenda = vec![AgendaItem::new("Intro"), AgendaItem::new("Roadmap")];
        MeetingStateHandle::new(MeetingState::new("Planning", Vec::new(), agenda))
    }

    #[tokio::test]
    async fn test_acknowledge_is_idempotent() {
        let handle = handle_with_agenda();
        let suggestion = Suggestion::new(
            "ambiguity",
            SuggestionType::Ambiguity,
            "Title",
            "Message",
            Priority::Medium,
            Utc::now(),
        );
        let id = suggestion.id.clone();
        handle.lock().await.suggestions.push(suggestion);

        assert!(handle.acknowledge_suggestion(&id).await);
        assert!(handle.acknowledge_suggestion(&id).await);
        let state = handle.snapshot().await;
        assert!(state.suggestions[0].is_acknowledged);

        assert!(!handle.acknowledge_suggestion("missing").await);
        assert_eq!(handle.snapshot().await.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_update_action_item_overwrites_given_fields() {
        let handle = handle_with_agenda();
        let item = ActionItem::new("Write the plan");
        let id = item.id.clone();
        handle.lock().await.action_items.push(item);

        let update = ActionItemUpdate {
            status: Some(ActionStatus::Completed),
            is_verified: Some(true),
            ..ActionItemUpdate::default()
        };
        assert!(handle.update_action_item(&id, update).await);

        let state = handle.snapshot().await;
        let item = &state.action_items[0];
        assert_eq!(item.status, ActionStatus::Completed);
        assert!(item.is_verified);
        assert_eq!(item.task, "Write the plan");

        assert!(!handle.update_action_item("nope", ActionItemUpdate::default()).await);
    }

    #[tokio::test]
    async fn test_update_agenda_item_stamps_times() {
        let handle = handle_with_agenda();
        assert!(handle.update_agenda_item(0).await);
        assert!(handle.update_agenda_item(1).await);

        let state = handle.snapshot().await;
        assert_eq!(state.current_agenda_item, 1);
        assert!(state.agenda[0].start_time.is_some());
        assert!(state.agenda[0].end_time.is_some());
        assert!(state.agenda[1].start_time.is_some());
        assert!(state.agenda[1].end_time.is_none());
    }

    #[tokio::test]
    async fn test_update_agenda_item_out_of_range_is_noop() {
        let handle = handle_with_agenda();
        assert!(!handle.update_agenda_item(5).await);
        let state = handle.snapshot().await;
        assert_eq!(state.current_agenda_item, 0);
        assert!(state.agenda[0].start_time.is_none());
    }

    #[tokio::test]
    async fn test_add_decision_and_agenda_item() {
        let handle = handle_with_agenda();
        handle.add_decision(Decision::new("Go with option B")).await;
        handle.add_agenda_item(AgendaItem::new("Q&A")).await;

        let state = handle.snapshot().await;
        assert_eq!(state.decisions[0].title, "Go with option B");
        assert_eq!(state.agenda.len(), 3);
    }

    #[tokio::test]
    async fn test_end_meeting_once() {
        let handle = handle_with_agenda();
        assert!(handle.end_meeting().await);
        assert!(!handle.end_meeting().await);

        let state = handle.snapshot().await;
        assert!(!state.is_active);
        assert!(state.agenda[0].end_time.is_some());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let handle = handle_with_agenda();
        let other = handle.clone();
        other.add_decision(Decision::new("Shared")).await;
        assert_eq!(handle.snapshot().await.decisions.len(), 1);
    }
}
