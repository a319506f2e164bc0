use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::types::{ActionItem, AgendaItem, Attendee, Decision, MeetingState};

pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate summary";
pub const SUMMARY_FAILED: &str = "Error generating summary";

/// End-of-meeting summary: generated prose plus the structured record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSummary {
    pub title: String,
    pub date: DateTime<Utc>,
    /// Whole minutes since the meeting started.
    pub duration: i64,
    pub attendees: Vec<Attendee>,
    pub absentees: Vec<Attendee>,
    pub agenda: Vec<AgendaItem>,
    pub summary: String,
    pub decisions: Vec<Decision>,
    pub action_items: Vec<ActionItem>,
}

impl MeetingSummary {
    pub fn from_state(state: &MeetingState, duration: i64, summary: String) -> Self {
        Self {
            title: state.title.clone(),
            date: state.start_time,
            duration,
            attendees: state.attendees.clone(),
            absentees: state
                .attendees
                .iter()
                .filter(|a| !a.is_present)
                .cloned()
                .collect(),
            agenda: state.agenda.clone(),
            summary,
            decisions: state.decisions.clone(),
            action_items: state.action_items.clone(),
        }
    }

    /// Plain-text export.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "MEETING SUMMARY: {}", self.title)?;
        writeln!(out, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(out, "Duration: {} minutes", self.duration)?;

        if !self.attendees.is_empty() {
            let names: Vec<&str> = self.attendees.iter().map(|a| a.name.as_str()).collect();
            writeln!(out, "Attendees: {}", names.join(", "))?;
        }
        if !self.absentees.is_empty() {
            let names: Vec<&str> = self.absentees.iter().map(|a| a.name.as_str()).collect();
            writeln!(out, "Absent: {}", names.join(", "))?;
        }

        writeln!(out, "\nAGENDA:")?;
        for (index, item) in self.agenda.iter().enumerate() {
            match item.duration {
                Some(minutes) => writeln!(out, "{}. {} ({} min)", index + 1, item.title, minutes)?,
                None => writeln!(out, "{}. {}", index + 1, item.title)?,
            }
        }

        writeln!(out, "\nDECISIONS MADE:")?;
        for decision in &self.decisions {
            if decision.description.is_empty() {
                writeln!(out, "- {}", decision.title)?;
            } else {
                writeln!(out, "- {}: {}", decision.title, decision.description)?;
            }
        }

        writeln!(out, "\nACTION ITEMS:")?;
        for action in &self.action_items {
            write!(out, "- {} - {}", action.task, action.assignees.join(", "))?;
            if let Some(deadline) = action.deadline {
                write!(out, " (Due: {})", deadline)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "\nSUMMARY:\n{}", self.summary)
    }
}
