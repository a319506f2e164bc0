//! Tracks whether the discussion stays on the current agenda item.

use anyhow::Result;

use super::lexicon::{COMPLETION_PHRASES, OFF_TOPIC_PHRASES};
use super::text::{contains_any, extract_keywords, relevance, RELEVANCE_THRESHOLD};
use super::{AnalysisContext, Analyzer, AnalyzerOutput};
use crate::meeting::{AgendaItem, MeetingState, Priority, Suggestion, SuggestionType};

const WINDOW: usize = 5;
const COMPLETION_WINDOW: usize = 3;
/// Consecutive off-topic statements that count as drift.
const DRIFT_THRESHOLD: usize = 3;
/// Allowed overrun of an agenda item's planned duration.
const OVERRUN_FACTOR: f64 = 1.2;

#[derive(Debug, Default)]
pub struct GoalDriftTracker;

impl GoalDriftTracker {
    pub fn new() -> Self {
        Self
    }

    /// Length of the off-topic run ending at the most recent entry.
    fn trailing_off_topic_run(&self, state: &MeetingState) -> usize {
        let current = state.current_agenda();
        let mut count = 0;

        for entry in state.recent_transcript(WINDOW) {
            if is_off_topic(&entry.text.to_lowercase(), current) {
                count += 1;
            } else {
                count = 0;
            }
        }

        count
    }
}

impl Analyzer for GoalDriftTracker {
    fn name(&self) -> &'static str {
        "GoalDriftTracker"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let mut suggestions = Vec::new();
        let current = state.current_agenda();
        let current_title = current
            .map(|item| item.title.as_str())
            .unwrap_or("No current agenda item");

        let off_topic = self.trailing_off_topic_run(state);
        if off_topic >= DRIFT_THRESHOLD {
            suggestions.push(Suggestion::new(
                "topic_drift",
                SuggestionType::GoalTracking,
                "Conversation Drifting Off-Topic",
                format!(
                    "The discussion has been off-topic for {} consecutive statements. Consider redirecting to the current agenda item: \"{}\"",
                    off_topic, current_title
                ),
                Priority::Medium,
                ctx.now,
            ));
        }

        let Some(item) = current else {
            return Ok(AnalyzerOutput::suggestions(suggestions));
        };

        if let Some(duration) = item.duration {
            let started = item.start_time.unwrap_or(state.start_time);
            let elapsed_minutes = (ctx.now - started).num_milliseconds() as f64 / 60_000.0;

            if elapsed_minutes > f64::from(duration) * OVERRUN_FACTOR {
                suggestions.push(Suggestion::new(
                    "time_overrun",
                    SuggestionType::GoalTracking,
                    "Agenda Item Taking Too Long",
                    format!(
                        "\"{}\" has exceeded its planned duration of {} minutes. Consider wrapping up or moving to the next item.",
                        item.title, duration
                    ),
                    Priority::High,
                    ctx.now,
                ));
            }
        }

        let recent_text = state
            .recent_transcript(COMPLETION_WINDOW)
            .iter()
            .map(|entry| entry.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        if contains_any(&recent_text, COMPLETION_PHRASES) {
            suggestions.push(Suggestion::new(
                "agenda_complete",
                SuggestionType::GoalTracking,
                "Current Agenda Item Complete",
                format!(
                    "\"{}\" appears to be complete. Consider moving to the next agenda item.",
                    item.title
                ),
                Priority::Low,
                ctx.now,
            ));
        }

        Ok(AnalyzerOutput::suggestions(suggestions))
    }
}

/// `text` must be lower-cased. Nothing is off-topic without an agenda item.
fn is_off_topic(text: &str, current: Option<&AgendaItem>) -> bool {
    let Some(item) = current else {
        return false;
    };

    if contains_any(text, OFF_TOPIC_PHRASES) {
        return true;
    }

    let topic = format!(
        "{} {}",
        item.title.to_lowercase(),
        item.description.as_deref().unwrap_or("").to_lowercase()
    );

    relevance(&extract_keywords(&topic), &extract_keywords(text)) < RELEVANCE_THRESHOLD
}
