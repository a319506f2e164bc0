//! Proposes concrete wording: stronger verbs, deadlines, success criteria,
//! resources and scope.

use anyhow::Result;
use chrono::{DateTime, Utc};

use super::lexicon::{
    strong_alternatives, ACTION_WORDS, DEADLINE_INDICATORS, RESOURCE_INDICATORS,
    SUCCESS_CRITERIA_INDICATORS, VAGUE_SCOPE_PHRASES, WEAK_VERBS,
};
use super::text::{contains_any, matching};
use super::{AnalysisContext, Analyzer, AnalyzerOutput};
use crate::meeting::{MeetingState, Priority, Suggestion, SuggestionType};

const WINDOW: usize = 3;

#[derive(Debug, Default)]
pub struct SpecificityProposer;

impl SpecificityProposer {
    pub fn new() -> Self {
        Self
    }

    /// Every suggestion for one lower-cased statement.
    fn review(&self, text: &str, now: DateTime<Utc>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for verb in matching(text, WEAK_VERBS) {
            suggestions.push(specificity(
                "weak_verb",
                "Weak Action Verb Detected",
                format!(
                    "\"{}\" is vague. Consider using more specific verbs like: {}. This will make the task more actionable.",
                    verb,
                    strong_alternatives(verb).join(", ")
                ),
                Priority::Medium,
                now,
            ));
        }

        if contains_any(text, ACTION_WORDS) {
            if !contains_any(text, DEADLINE_INDICATORS) {
                suggestions.push(specificity(
                    "missing_deadline",
                    "Missing Deadline",
                    "This task lacks a specific deadline. Consider asking: \"When should this be completed?\" or \"What's the target date?\"",
                    Priority::High,
                    now,
                ));
            }

            if !contains_any(text, SUCCESS_CRITERIA_INDICATORS) {
                suggestions.push(specificity(
                    "missing_criteria",
                    "Missing Success Criteria",
                    "This task lacks clear success criteria. Consider asking: \"How will we know when this is complete?\" or \"What does success look like?\"",
                    Priority::Medium,
                    now,
                ));
            }

            if !contains_any(text, RESOURCE_INDICATORS) {
                suggestions.push(specificity(
                    "missing_resources",
                    "Missing Resource Information",
                    "This task lacks resource information. Consider asking: \"What resources are needed?\" or \"Who can provide support?\"",
                    Priority::Low,
                    now,
                ));
            }
        }

        for phrase in matching(text, VAGUE_SCOPE_PHRASES) {
            suggestions.push(specificity(
                "unclear_scope",
                "Unclear Scope",
                format!(
                    "\"{}\" is vague. Consider being more specific about what exactly needs to be done.",
                    phrase
                ),
                Priority::Medium,
                now,
            ));
        }

        suggestions
    }
}

impl Analyzer for SpecificityProposer {
    fn name(&self) -> &'static str {
        "SpecificityProposer"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let suggestions = state
            .recent_transcript(WINDOW)
            .iter()
            .flat_map(|entry| self.review(&entry.text.to_lowercase(), ctx.now))
            .collect();

        Ok(AnalyzerOutput::suggestions(suggestions))
    }
}

fn specificity(
    prefix: &str,
    title: &str,
    message: impl Into<String>,
    priority: Priority,
    now: DateTime<Utc>,
) -> Suggestion {
    Suggestion::new(prefix, SuggestionType::Specificity, title, message, priority, now)
}
