//! Extracts action items (task, assignees, deadline, priority) from recent
//! transcript sentences.
//!
//! Assignee patterns without a capture group contribute their whole match,
//! so "I will send it" yields the literal assignee "I will" unless an
//! attendee name overlaps it.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use super::lexicon::{
    ACTION_VERBS, ASSIGNEE_PATTERNS, DEADLINE_PATTERNS, IMPORTANT_WORDS, RELATIVE_OFFSET_PATTERN,
    TASK_MODAL_PREFIX, TASK_SELF_REFERENCE_PREFIX, URGENT_WORDS,
};
use super::text::{contains_any, is_similar_task};
use super::{AnalysisContext, Analyzer, AnalyzerOutput, StatePatch};
use crate::meeting::{ActionItem, Attendee, MeetingState, Priority, Suggestion, SuggestionType, TranscriptEntry};

const WINDOW: usize = 5;
const MIN_TASK_CHARS: usize = 10;

pub struct ActionItemExtractor {
    sentence_split: Regex,
    assignee_patterns: Vec<Regex>,
    deadline_patterns: Vec<Regex>,
    relative_offset: Regex,
    self_reference_prefix: Regex,
    modal_prefix: Regex,
}

impl ActionItemExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            sentence_split: Regex::new(r"[.!?]+")?,
            assignee_patterns: compile_all(ASSIGNEE_PATTERNS).context("Invalid assignee pattern")?,
            deadline_patterns: compile_all(DEADLINE_PATTERNS).context("Invalid deadline pattern")?,
            relative_offset: Regex::new(RELATIVE_OFFSET_PATTERN)?,
            self_reference_prefix: Regex::new(TASK_SELF_REFERENCE_PREFIX)?,
            modal_prefix: Regex::new(TASK_MODAL_PREFIX)?,
        })
    }

    /// Action-item candidates for every action sentence of one entry.
    pub fn extract(&self, entry: &TranscriptEntry, attendees: &[Attendee], now: DateTime<Utc>) -> Vec<ActionItem> {
        self.sentence_split
            .split(&entry.text)
            .filter(|sentence| !sentence.trim().is_empty())
            .filter(|sentence| contains_any(&sentence.to_lowercase(), ACTION_VERBS))
            .filter_map(|sentence| self.parse_sentence(sentence, attendees, entry.timestamp, now))
            .collect()
    }

    fn parse_sentence(
        &self,
        sentence: &str,
        attendees: &[Attendee],
        timestamp: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<ActionItem> {
        let task = self.clean_task(sentence);
        if task.chars().count() < MIN_TASK_CHARS {
            return None;
        }

        let mut item = ActionItem::new(task);
        item.assignees = self.extract_assignees(sentence, attendees);
        item.deadline = self.extract_deadline(sentence, now.date_naive());
        item.priority = priority_of(sentence);
        item.timestamp = timestamp;
        Some(item)
    }

    pub fn extract_assignees(&self, sentence: &str, attendees: &[Attendee]) -> Vec<String> {
        let mut assignees: Vec<String> = Vec::new();

        for pattern in &self.assignee_patterns {
            let Some(captures) = pattern.captures(sentence) else {
                continue;
            };
            let Some(found) = captures.get(1).or_else(|| captures.get(0)) else {
                continue;
            };

            let candidate = found.as_str();
            if candidate.is_empty() {
                continue;
            }

            let resolved = resolve_attendee(candidate, attendees).unwrap_or_else(|| candidate.to_string());
            if !assignees.contains(&resolved) {
                assignees.push(resolved);
            }
        }

        assignees
    }

    /// Each matching pattern's fragment is resolved in turn; the first that
    /// resolves wins. When no pattern matches at all, the sentence itself is
    /// resolved. A matched fragment like "next Friday" resolves to nothing.
    pub fn extract_deadline(&self, sentence: &str, today: NaiveDate) -> Option<NaiveDate> {
        let mut any_match = false;

        for pattern in &self.deadline_patterns {
            if let Some(fragment) = pattern.find(sentence) {
                any_match = true;
                if let Some(deadline) = self.resolve_relative(fragment.as_str(), today) {
                    return Some(deadline);
                }
            }
        }

        if any_match {
            return None;
        }

        self.resolve_relative(sentence, today)
    }

    fn resolve_relative(&self, fragment: &str, today: NaiveDate) -> Option<NaiveDate> {
        let lower = fragment.to_lowercase();

        if lower.contains("tomorrow") {
            return today.checked_add_signed(Duration::days(1));
        }
        if lower.contains("next week") {
            return today.checked_add_signed(Duration::days(7));
        }
        if lower.contains("next month") {
            return today.checked_add_months(Months::new(1));
        }

        let captures = self.relative_offset.captures(&lower)?;
        let amount: u32 = captures.get(1)?.as_str().parse().ok()?;
        let unit = captures.get(2)?.as_str();

        if unit.starts_with("day") {
            today.checked_add_signed(Duration::days(i64::from(amount)))
        } else if unit.starts_with("week") {
            today.checked_add_signed(Duration::weeks(i64::from(amount)))
        } else {
            today.checked_add_months(Months::new(amount))
        }
    }

    /// Drops a leading self-reference then a leading modal, and capitalizes.
    pub fn clean_task(&self, sentence: &str) -> String {
        let without_subject = self.self_reference_prefix.replace(sentence.trim_start(), "");
        let without_modal = self.modal_prefix.replace(without_subject.trim_start(), "");
        let trimmed = without_modal.trim();

        let mut chars = trimmed.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl Analyzer for ActionItemExtractor {
    fn name(&self) -> &'static str {
        "ActionItemExtractor"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let mut suggestions = Vec::new();
        let mut new_items: Vec<ActionItem> = Vec::new();

        for entry in state.recent_transcript(WINDOW) {
            for item in self.extract(entry, &state.attendees, ctx.now) {
                let duplicate = state
                    .action_items
                    .iter()
                    .chain(new_items.iter())
                    .any(|existing| is_similar_task(&existing.task, &item.task));

                if duplicate {
                    debug!("Skipping duplicate action item: {}", item.task);
                    continue;
                }

                suggestions.push(Suggestion::new(
                    "action_item",
                    SuggestionType::ActionItem,
                    "New Action Item Identified",
                    describe(&item),
                    Priority::High,
                    ctx.now,
                ));
                new_items.push(item);
            }
        }

        Ok(AnalyzerOutput {
            suggestions,
            patch: StatePatch {
                new_action_items: new_items,
            },
        })
    }
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).with_context(|| format!("pattern: {}", pattern)))
        .collect()
}

/// First attendee whose name contains, or is contained in, the candidate.
fn resolve_attendee(candidate: &str, attendees: &[Attendee]) -> Option<String> {
    let candidate = candidate.to_lowercase();
    attendees
        .iter()
        .find(|attendee| {
            let name = attendee.name.to_lowercase();
            name.contains(&candidate) || candidate.contains(&name)
        })
        .map(|attendee| attendee.name.clone())
}

fn priority_of(sentence: &str) -> Priority {
    let lower = sentence.to_lowercase();
    if contains_any(&lower, URGENT_WORDS) {
        Priority::High
    } else if contains_any(&lower, IMPORTANT_WORDS) {
        Priority::Medium
    } else {
        Priority::Low
    }
}

fn describe(item: &ActionItem) -> String {
    let assignees = if item.assignees.is_empty() {
        "Not specified".to_string()
    } else {
        item.assignees.join(", ")
    };
    let deadline = item
        .deadline
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Not specified".to_string());

    format!(
        "Task: \"{}\" | Assignee(s): {} | Deadline: {}",
        item.task, assignees, deadline
    )
}
