//! Flags hedged commitments, vague timelines and unowned actions.

use anyhow::Result;

use super::lexicon::{ACTION_WORDS, ASSIGNEE_INDICATORS, HEDGING_PHRASES, VAGUE_TIME_PHRASES};
use super::text::{contains_any, matching};
use super::{AnalysisContext, Analyzer, AnalyzerOutput};
use crate::meeting::{MeetingState, Priority, Suggestion, SuggestionType};

const WINDOW: usize = 10;

#[derive(Debug, Default)]
pub struct AmbiguityDetector;

impl AmbiguityDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AmbiguityDetector {
    fn name(&self) -> &'static str {
        "AmbiguityDetector"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let mut suggestions = Vec::new();

        for entry in state.recent_transcript(WINDOW) {
            let text = entry.text.to_lowercase();

            for _phrase in matching(&text, HEDGING_PHRASES) {
                suggestions.push(Suggestion::new(
                    "ambiguity",
                    SuggestionType::Ambiguity,
                    "Ambiguous Statement Detected",
                    format!(
                        "\"{}\" - This statement lacks specificity. Consider asking: Who will handle this? What exactly needs to be done? When should it be completed?",
                        entry.text
                    ),
                    Priority::Medium,
                    ctx.now,
                ));
            }

            for _phrase in matching(&text, VAGUE_TIME_PHRASES) {
                suggestions.push(Suggestion::new(
                    "time_ambiguity",
                    SuggestionType::Ambiguity,
                    "Vague Timeline Detected",
                    format!(
                        "\"{}\" - This timeline is unclear. Consider asking for a specific date or deadline.",
                        entry.text
                    ),
                    Priority::High,
                    ctx.now,
                ));
            }

            if contains_any(&text, ACTION_WORDS) && !contains_any(&text, ASSIGNEE_INDICATORS) {
                suggestions.push(Suggestion::new(
                    "missing_assignee",
                    SuggestionType::Ambiguity,
                    "Missing Assignee",
                    format!(
                        "\"{}\" - This appears to be an action item but lacks a clear assignee. Who should be responsible for this task?",
                        entry.text
                    ),
                    Priority::High,
                    ctx.now,
                ));
            }
        }

        Ok(AnalyzerOutput::suggestions(suggestions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::TranscriptEntry;
    use chrono::Utc;

    fn state_with(lines: &[&str]) -> MeetingState {
        let mut state = MeetingState::new("Planning", Vec::new(), Vec::new());
        for line in lines {
            state.transcript.push(TranscriptEntry::new("Dana", *line));
        }
        state
    }

    fn run(state: &MeetingState) -> Vec<Suggestion> {
        AmbiguityDetector::new()
            .analyze(state, &AnalysisContext::at(Utc::now()))
            .unwrap()
            .suggestions
    }

    #[test]
    fn test_hedging_phrase_is_flagged() {
        let suggestions = run(&state_with(&["Let's discuss later once numbers are in."]));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].title, "Ambiguous Statement Detected");
        assert_eq!(suggestions[0].priority, Priority::Medium);
        assert!(suggestions[0].message.contains("Let's discuss later"));
    }

    #[test]
    fn test_one_suggestion_per_vague_time_phrase() {
        // "eventually" and "at some point" both match
        let suggestions = run(&state_with(&["Eventually, at some point, it happens."]));
        let vague: Vec<_> = suggestions
            .iter()
            .filter(|s| s.title == "Vague Timeline Detected")
            .collect();
        assert_eq!(vague.len(), 2);
        assert!(vague.iter().all(|s| s.priority == Priority::High));
    }

    #[test]
    fn test_missing_assignee_requires_action_without_owner() {
        let unowned = run(&state_with(&["The deck must be updated."]));
        assert!(unowned.iter().any(|s| s.title == "Missing Assignee"));

        let owned = run(&state_with(&["I will update the deck."]));
        assert!(!owned.iter().any(|s| s.title == "Missing Assignee"));
    }

    #[test]
    fn test_checks_fire_independently() {
        let suggestions = run(&state_with(&["We should probably fix it soon."]));
        let titles: Vec<&str> = suggestions.iter().map(|s| s.title.as_str()).collect();
        assert!(titles.contains(&"Ambiguous Statement Detected"));
        assert!(titles.contains(&"Vague Timeline Detected"));
        assert!(titles.contains(&"Missing Assignee"));
        assert!(suggestions.iter().all(|s| s.kind == SuggestionType::Ambiguity));
    }

    #[test]
    fn test_only_last_ten_entries_are_scanned() {
        let mut lines = vec!["We'll see."];
        lines.extend(std::iter::repeat("Numbers look fine.").take(10));
        assert!(run(&state_with(&lines)).is_empty());
    }
}
