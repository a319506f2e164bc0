//! Surfaces unresolved items near the planned end of a meeting and when
//! participants signal that they are closing.

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::lexicon::CLOSING_PHRASES;
use super::text::contains_any;
use super::{AnalysisContext, Analyzer, AnalyzerOutput};
use crate::meeting::{MeetingState, Priority, Suggestion, SuggestionType};

/// Share of the planned duration after which the meeting is nearing its end.
const NEARING_END_PROGRESS: f64 = 0.8;
const CLOSING_WINDOW: usize = 3;

#[derive(Debug, Default)]
pub struct FinalizationRecommender;

impl FinalizationRecommender {
    pub fn new() -> Self {
        Self
    }

    fn is_nearing_end(&self, state: &MeetingState, now: DateTime<Utc>) -> bool {
        let Some(end) = state.end_time else {
            return false;
        };

        let total = (end - state.start_time).num_milliseconds();
        if total <= 0 {
            return false;
        }

        let elapsed = (now - state.start_time).num_milliseconds();
        elapsed as f64 / total as f64 >= NEARING_END_PROGRESS
    }

    fn has_closing_signal(&self, state: &MeetingState) -> bool {
        let recent_text = state
            .recent_transcript(CLOSING_WINDOW)
            .iter()
            .map(|entry| entry.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        contains_any(&recent_text, CLOSING_PHRASES)
    }

    fn wrap_up(&self, state: &MeetingState, now: DateTime<Utc>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        let unverified_decisions: Vec<&str> = state
            .decisions
            .iter()
            .filter(|d| !d.is_verified)
            .map(|d| d.title.as_str())
            .collect();
        if !unverified_decisions.is_empty() {
            suggestions.push(finalization(
                "verify_decisions",
                "Verify Decisions",
                format!(
                    "You have {} unverified decisions. Consider asking: \"Let's confirm our decisions: {}\"",
                    unverified_decisions.len(),
                    unverified_decisions.join(", ")
                ),
                Priority::High,
                now,
            ));
        }

        let unverified_actions: Vec<&str> = state
            .action_items
            .iter()
            .filter(|a| !a.is_verified)
            .map(|a| a.task.as_str())
            .collect();
        if !unverified_actions.is_empty() {
            suggestions.push(finalization(
                "verify_actions",
                "Verify Action Items",
                format!(
                    "You have {} unverified action items. Consider asking: \"Let's confirm our action items: {}\"",
                    unverified_actions.len(),
                    unverified_actions.join(", ")
                ),
                Priority::High,
                now,
            ));
        }

        let incomplete: Vec<&str> = state
            .agenda
            .iter()
            .filter(|item| !item.is_completed)
            .map(|item| item.title.as_str())
            .collect();
        if !incomplete.is_empty() {
            suggestions.push(finalization(
                "incomplete_agenda",
                "Incomplete Agenda Items",
                format!(
                    "You have {} incomplete agenda items: {}. Consider prioritizing or rescheduling.",
                    incomplete.len(),
                    incomplete.join(", ")
                ),
                Priority::Medium,
                now,
            ));
        }

        suggestions.push(finalization(
            "next_steps",
            "Plan Next Steps",
            "Consider asking: \"What are our next steps?\" or \"What should we focus on before our next meeting?\"",
            Priority::Medium,
            now,
        ));

        suggestions
    }

    fn conclusion(&self, now: DateTime<Utc>) -> Vec<Suggestion> {
        vec![
            finalization(
                "meeting_summary",
                "Provide Meeting Summary",
                "Consider summarizing: \"To recap, we decided on [decisions] and will take action on [action items]. Our next steps are [next steps].\"",
                Priority::High,
                now,
            ),
            finalization(
                "follow_up",
                "Schedule Follow-up",
                "Consider asking: \"When should we meet again to review progress?\" or \"Who will send out the meeting summary?\"",
                Priority::Medium,
                now,
            ),
        ]
    }
}

impl Analyzer for FinalizationRecommender {
    fn name(&self) -> &'static str {
        "FinalizationRecommender"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let mut suggestions = Vec::new();

        if self.is_nearing_end(state, ctx.now) {
            suggestions.extend(self.wrap_up(state, ctx.now));
        }

        if self.has_closing_signal(state) {
            suggestions.extend(self.conclusion(ctx.now));
        }

        Ok(AnalyzerOutput::suggestions(suggestions))
    }
}

fn finalization(
    prefix: &str,
    title: &str,
    message: impl Into<String>,
    priority: Priority,
    now: DateTime<Utc>,
) -> Suggestion {
    Suggestion::new(prefix, SuggestionType::Finalization, title, message, priority, now)
}
