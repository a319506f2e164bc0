//! Prompt text for live insights and end-of-meeting summaries.

use super::CompletionRequest;
use crate::meeting::{MeetingState, Suggestion, TranscriptEntry};

const INSIGHT_TEMPERATURE: f32 = 0.7;
const INSIGHT_TOP_P: f32 = 0.9;
const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_TOP_P: f32 = 0.8;

const RECENT_LINES: usize = 3;

/// Request for one insight after `entry` was processed. `state` already
/// contains the entry and the merged analyzer results.
pub fn insight_request(
    state: &MeetingState,
    entry: &TranscriptEntry,
    new_suggestions: &[Suggestion],
    max_tokens: u32,
) -> CompletionRequest {
    let agenda_title = state
        .current_agenda()
        .map(|item| item.title.as_str())
        .unwrap_or("No current agenda item");

    let recent = state
        .recent_transcript(RECENT_LINES)
        .iter()
        .map(TranscriptEntry::line)
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "You are an AI meeting assistant that helps meeting organizers steer conversations toward clear, actionable outcomes.

Current meeting context:
- Title: {}
- Current agenda item: {}
- Recent transcript: {}
- Current decisions: {}
- Current action items: {}

Give the organizer direct, actionable suggestions that:
1. Keep the meeting focused and productive
2. Secure clear decisions and action items
3. Move the conversation toward specific outcomes
4. Maintain momentum

Be direct and assertive. Only the organizer sees these suggestions.",
        state.title,
        agenda_title,
        recent,
        decision_titles(state),
        action_tasks(state),
    );

    let analyzer_lines = new_suggestions
        .iter()
        .map(|s| format!("- {}: {}", s.title, s.message))
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "New transcript entry: \"{}\"

Analyzer suggestions: {}

Based on this new information, give 1-2 direct, actionable suggestions for the meeting organizer. Focus on the issues that need attention right now.",
        entry.line(),
        analyzer_lines,
    );

    CompletionRequest {
        system,
        user,
        temperature: INSIGHT_TEMPERATURE,
        top_p: INSIGHT_TOP_P,
        max_tokens,
    }
}

/// Request for a prose summary of the whole meeting.
pub fn summary_request(state: &MeetingState, duration_minutes: i64, max_tokens: u32) -> CompletionRequest {
    let attendees = state
        .attendees
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let agenda = state
        .agenda
        .iter()
        .map(|a| a.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let transcript = state
        .transcript
        .iter()
        .map(TranscriptEntry::line)
        .collect::<Vec<_>>()
        .join("\n");
    let action_items = state
        .action_items
        .iter()
        .map(|a| format!("{} ({})", a.task, a.assignees.join(", ")))
        .collect::<Vec<_>>()
        .join(", ");

    let system = format!(
        "You are an AI meeting assistant that writes complete meeting summaries.

Meeting details:
- Title: {}
- Duration: {} minutes
- Attendees: {}
- Agenda: {}
- Full transcript: {}
- Decisions made: {}
- Action items: {}

Write a professional meeting summary that includes:
1. Meeting header with title, date, time and attendees
2. Meeting purpose and objectives
3. Key decisions made
4. Action items with assignees and deadlines
5. Next steps and follow-up items

Format the output as a structured document.",
        state.title,
        duration_minutes,
        attendees,
        agenda,
        transcript,
        decision_titles(state),
        action_items,
    );

    CompletionRequest {
        system,
        user: "Generate the meeting summary.".to_string(),
        temperature: SUMMARY_TEMPERATURE,
        top_p: SUMMARY_TOP_P,
        max_tokens,
    }
}

fn decision_titles(state: &MeetingState) -> String {
    state
        .decisions
        .iter()
        .map(|d| d.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn action_tasks(state: &MeetingState) -> String {
    state
        .action_items
        .iter()
        .map(|a| a.task.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
