//! Meeting orchestrator.
//!
//! Owns one meeting's state and runs the analyzer pipeline for each
//! transcript entry:
//! append → analyze → merge → commit → insight → return
//!
//! Analyzers and the insight provider are injected via constructor.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::analysis::text::is_similar_task;
use crate::analysis::{default_analyzers, AnalysisContext, Analyzer};
use crate::config::InsightConfig;
use crate::insight::prompts::{insight_request, summary_request};
use crate::insight::{CompletionRequest, InsightError, InsightProvider};

use super::state::MeetingStateHandle;
use super::summary::{MeetingSummary, SUMMARY_FAILED, SUMMARY_UNAVAILABLE};
use super::types::{
    ActionItemUpdate, AgendaItem, Decision, MeetingState, Priority, Suggestion, SuggestionType,
    TranscriptEntry,
};

/// Limits applied to insight and summary requests.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub request_timeout: Duration,
    pub insight_max_tokens: u32,
    pub summary_max_tokens: u32,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self::from_config(&InsightConfig::default())
    }
}

impl AssistantSettings {
    pub fn from_config(config: &InsightConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.timeout_seconds),
            insight_max_tokens: config.insight_max_tokens,
            summary_max_tokens: config.summary_max_tokens,
        }
    }
}

/// Result of ingesting one transcript entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessOutcome {
    /// Suggestions produced by this entry, in analyzer order, followed by
    /// the AI insight when one was generated.
    pub suggestions: Vec<Suggestion>,
    pub state: MeetingState,
}

pub struct MeetingAssistant {
    analyzers: Vec<Box<dyn Analyzer>>,
    insight: Arc<dyn InsightProvider>,
    state: MeetingStateHandle,
    settings: AssistantSettings,
}

impl MeetingAssistant {
    /// Assistant running the built-in analyzer pipeline.
    pub fn new(
        state: MeetingState,
        insight: Arc<dyn InsightProvider>,
        settings: AssistantSettings,
    ) -> Result<Self> {
        Ok(Self::with_analyzers(
            state,
            default_analyzers()?,
            insight,
            settings,
        ))
    }

    pub fn with_analyzers(
        state: MeetingState,
        analyzers: Vec<Box<dyn Analyzer>>,
        insight: Arc<dyn InsightProvider>,
        settings: AssistantSettings,
    ) -> Self {
        info!(
            "Meeting {} started: \"{}\" ({} analyzers, insights via {})",
            state.id,
            state.title,
            analyzers.len(),
            insight.name()
        );

        Self {
            analyzers,
            insight,
            state: MeetingStateHandle::new(state),
            settings,
        }
    }

    /// Handle to the meeting state, shared with API handlers.
    pub fn state(&self) -> &MeetingStateHandle {
        &self.state
    }

    pub async fn snapshot(&self) -> MeetingState {
        self.state.snapshot().await
    }

    pub async fn process_transcript(&self, entry: TranscriptEntry) -> ProcessOutcome {
        self.process_transcript_at(entry, Utc::now()).await
    }

    /// Ingest one entry with `now` as the analysis time.
    pub async fn process_transcript_at(
        &self,
        entry: TranscriptEntry,
        now: DateTime<Utc>,
    ) -> ProcessOutcome {
        let (mut suggestions, committed) = {
            let mut state = self.state.lock().await;
            if !state.is_active {
                warn!(
                    "Meeting {} has ended, ignoring transcript entry from {}",
                    state.id, entry.speaker
                );
                return ProcessOutcome {
                    suggestions: Vec::new(),
                    state: state.clone(),
                };
            }

            state.transcript.push(entry.clone());
            let snapshot = state.clone();
            let ctx = AnalysisContext::at(now);

            let mut suggestions = Vec::new();
            let mut new_action_items = Vec::new();
            for analyzer in &self.analyzers {
                match analyzer.analyze(&snapshot, &ctx) {
                    Ok(output) => {
                        debug!(
                            "{}: {} suggestions, {} action items",
                            analyzer.name(),
                            output.suggestions.len(),
                            output.patch.new_action_items.len()
                        );
                        suggestions.extend(output.suggestions);
                        new_action_items.extend(output.patch.new_action_items);
                    }
                    Err(e) => {
                        warn!("Analyzer {} failed, skipping: {:#}", analyzer.name(), e);
                    }
                }
            }

            for item in new_action_items {
                let duplicate = state
                    .action_items
                    .iter()
                    .any(|existing| is_similar_task(&existing.task, &item.task));
                if duplicate {
                    debug!("Dropping duplicate action item: {}", item.task);
                } else {
                    info!("Action item added: {}", item.task);
                    state.action_items.push(item);
                }
            }

            state.suggestions.extend(suggestions.iter().cloned());
            (suggestions, state.clone())
        };

        let request = insight_request(
            &committed,
            &entry,
            &suggestions,
            self.settings.insight_max_tokens,
        );

        let Some(insight) = self.generate_insight(&request, now).await else {
            return ProcessOutcome {
                suggestions,
                state: committed,
            };
        };

        let state = {
            let mut state = self.state.lock().await;
            state.suggestions.push(insight.clone());
            state.clone()
        };
        suggestions.push(insight);

        ProcessOutcome { suggestions, state }
    }

    async fn generate_insight(
        &self,
        request: &CompletionRequest,
        now: DateTime<Utc>,
    ) -> Option<Suggestion> {
        match self.complete(request).await {
            Ok(text) if !text.trim().is_empty() => Some(Suggestion::new(
                "ai_insight",
                SuggestionType::AiInsight,
                "AI Meeting Insight",
                text,
                Priority::High,
                now,
            )),
            Ok(_) => {
                debug!("Insight provider returned blank text");
                None
            }
            Err(InsightError::Disabled) => None,
            Err(e) => {
                warn!("Failed to generate AI insight: {}", e);
                None
            }
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        let timeout = self.settings.request_timeout;
        match tokio::time::timeout(timeout, self.insight.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(InsightError::Timeout {
                seconds: timeout.as_secs(),
            }),
        }
    }

    pub async fn generate_summary(&self) -> MeetingSummary {
        self.generate_summary_at(Utc::now()).await
    }

    /// Summary with the duration measured up to `now`.
    pub async fn generate_summary_at(&self, now: DateTime<Utc>) -> MeetingSummary {
        let state = self.state.snapshot().await;
        let elapsed_seconds = (now - state.start_time).num_seconds().max(0);
        let duration = (elapsed_seconds as f64 / 60.0).round() as i64;

        let request = summary_request(&state, duration, self.settings.summary_max_tokens);
        let summary = match self.complete(&request).await {
            Ok(text) if text.trim().is_empty() => SUMMARY_UNAVAILABLE.to_string(),
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to generate meeting summary: {}", e);
                SUMMARY_FAILED.to_string()
            }
        };

        info!("Summary generated for meeting {} ({} minutes)", state.id, duration);
        MeetingSummary::from_state(&state, duration, summary)
    }

    pub async fn acknowledge_suggestion(&self, id: &str) -> bool {
        self.state.acknowledge_suggestion(id).await
    }

    pub async fn add_decision(&self, decision: Decision) {
        self.state.add_decision(decision).await
    }

    pub async fn update_action_item(&self, id: &str, update: ActionItemUpdate) -> bool {
        self.state.update_action_item(id, update).await
    }

    pub async fn update_agenda_item(&self, index: usize) -> bool {
        self.state.update_agenda_item(index).await
    }

    pub async fn add_agenda_item(&self, item: AgendaItem) {
        self.state.add_agenda_item(item).await
    }

    pub async fn end_meeting(&self) -> bool {
        self.state.end_meeting().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalyzerOutput;
    use crate::insight::DisabledProvider;
    use async_trait::async_trait;

    struct CannedProvider(&'static str);

    #[async_trait]
    impl InsightProvider for CannedProvider {
        fn name(&self) -> &'static str {
            "canned"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, InsightError> {
            Ok(self.0.to_string())
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl InsightProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, InsightError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    struct FixedSuggestion;

    impl Analyzer for FixedSuggestion {
        fn name(&self) -> &'static str {
            "FixedSuggestion"
        }

        fn analyze(&self, _state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
            Ok(AnalyzerOutput::suggestions(vec![Suggestion::new(
                "fixed",
                SuggestionType::Ambiguity,
                "Fixed",
                "Always",
                Priority::Low,
                ctx.now,
            )]))
        }
    }

    fn assistant(provider: Arc<dyn InsightProvider>, settings: AssistantSettings) -> MeetingAssistant {
        MeetingAssistant::with_analyzers(
            MeetingState::new("Sync", Vec::new(), Vec::new()),
            vec![Box::new(FixedSuggestion)],
            provider,
            settings,
        )
    }

    #[tokio::test]
    async fn test_insight_is_appended_to_batch_and_state() {
        let assistant = assistant(
            Arc::new(CannedProvider("Ask who owns the rollout.")),
            AssistantSettings::default(),
        );

        let outcome = assistant
            .process_transcript(TranscriptEntry::new("Ana", "hello"))
            .await;
        assert_eq!(outcome.suggestions.len(), 2);
        let insight = &outcome.suggestions[1];
        assert_eq!(insight.kind, SuggestionType::AiInsight);
        assert_eq!(insight.title, "AI Meeting Insight");
        assert_eq!(insight.priority, Priority::High);
        assert_eq!(outcome.state.suggestions.len(), 2);

        assert!(assistant.acknowledge_suggestion(&insight.id).await);
    }

    #[tokio::test]
    async fn test_blank_insight_is_dropped() {
        let assistant = assistant(Arc::new(CannedProvider("   ")), AssistantSettings::default());
        let outcome = assistant
            .process_transcript(TranscriptEntry::new("Ana", "hello"))
            .await;
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.state.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_slow_insight_times_out() {
        let settings = AssistantSettings {
            request_timeout: Duration::from_millis(20),
            ..AssistantSettings::default()
        };
        let assistant = assistant(Arc::new(SlowProvider), settings);

        let outcome = assistant
            .process_transcript(TranscriptEntry::new("Ana", "hello"))
            .await;
        assert_eq!(outcome.suggestions.len(), 1);
        assert_eq!(outcome.suggestions[0].title, "Fixed");
    }

    #[tokio::test]
    async fn test_ended_meeting_ignores_entries() {
        let assistant = assistant(Arc::new(DisabledProvider), AssistantSettings::default());
        assert!(assistant.end_meeting().await);

        let outcome = assistant
            .process_transcript(TranscriptEntry::new("Ana", "still here?"))
            .await;
        assert!(outcome.suggestions.is_empty());
        assert!(outcome.state.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_summary_placeholders() {
        let blank = assistant(Arc::new(CannedProvider("")), AssistantSettings::default());
        assert_eq!(blank.generate_summary().await.summary, SUMMARY_UNAVAILABLE);

        let failing = assistant(Arc::new(DisabledProvider), AssistantSettings::default());
        assert_eq!(failing.generate_summary().await.summary, SUMMARY_FAILED);

        let working = assistant(Arc::new(CannedProvider("Short meeting.")), AssistantSettings::default());
        assert_eq!(working.generate_summary().await.summary, "Short meeting.");
    }

    #[tokio::test]
    async fn test_summary_duration_in_whole_minutes() {
        let assistant = assistant(Arc::new(DisabledProvider), AssistantSettings::default());
        let start = assistant.snapshot().await.start_time;
        let now = start + chrono::Duration::seconds(25 * 60 + 20);
        assert_eq!(assistant.generate_summary_at(now).await.duration, 25);
    }
}
