//! Client-supplied shapes for starting a meeting and feeding it.
//!
//! Ids and timestamps are assigned here, so callers only send content.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::types::{AgendaItem, Attendee, Decision, MeetingState, TranscriptEntry};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSetup {
    pub title: String,
    #[serde(default)]
    pub attendees: Vec<AttendeeInput>,
    #[serde(default)]
    pub agenda: Vec<AgendaInput>,
    /// Planned end. Takes precedence over `duration_minutes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl MeetingSetup {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Fresh meeting state starting at `start`. The first agenda item, if
    /// any, becomes current immediately.
    pub fn into_state(self, start: DateTime<Utc>) -> MeetingState {
        let attendees = self.attendees.into_iter().map(Attendee::from).collect();
        let agenda = self.agenda.into_iter().map(AgendaItem::from).collect();

        let mut state = MeetingState::new(self.title, attendees, agenda);
        state.start_time = start;
        state.end_time = self.end_time.or_else(|| {
            self.duration_minutes
                .map(|minutes| start + Duration::minutes(i64::from(minutes)))
        });
        if let Some(first) = state.agenda.first_mut() {
            first.start_time = Some(start);
        }
        state
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeInput {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_organizer: bool,
}

impl From<AttendeeInput> for Attendee {
    fn from(input: AttendeeInput) -> Self {
        let mut attendee = Attendee::new(input.name);
        attendee.email = input.email;
        attendee.is_organizer = input.is_organizer;
        attendee
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl From<AgendaInput> for AgendaItem {
    fn from(input: AgendaInput) -> Self {
        let mut item = AgendaItem::new(input.title);
        item.description = input.description;
        item.duration = input.duration;
        item
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptInput {
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TranscriptInput {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp: None,
            confidence: None,
        }
    }
}

impl From<TranscriptInput> for TranscriptEntry {
    fn from(input: TranscriptInput) -> Self {
        let mut entry = TranscriptEntry::at(
            input.speaker,
            input.text,
            input.timestamp.unwrap_or_else(Utc::now),
        );
        entry.confidence = input.confidence;
        entry
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl From<DecisionInput> for Decision {
    fn from(input: DecisionInput) -> Self {
        let mut decision = Decision::new(input.title);
        decision.description = input.description;
        decision.participants = input.participants;
        decision.is_verified = input.is_verified;
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_from_json() {
        let raw = r#"{
            "title": "Budget sync",
            "attendees": [{"name": "Alex", "isOrganizer": true}, {"name": "Sam"}],
            "agenda": [{"title": "Budget Review", "duration": 15}, {"title": "Hiring"}],
            "durationMinutes": 60
        }"#;
        let setup: MeetingSetup = serde_json::from_str(raw).unwrap();
        let start = Utc::now();
        let state = setup.into_state(start);

        assert_eq!(state.title, "Budget sync");
        assert!(state.attendees[0].is_organizer);
        assert!(state.attendees[1].is_present);
        assert_eq!(state.agenda[0].duration, Some(15));
        assert_eq!(state.agenda[0].start_time, Some(start));
        assert!(state.agenda[1].start_time.is_none());
        assert_eq!(state.end_time, Some(start + Duration::minutes(60)));
        assert!(state.is_active);
    }

    #[test]
    fn test_explicit_end_time_wins() {
        let start = Utc::now();
        let end = start + Duration::minutes(30);
        let setup = MeetingSetup {
            end_time: Some(end),
            duration_minutes: Some(90),
            ..MeetingSetup::titled("Standup")
        };
        assert_eq!(setup.into_state(start).end_time, Some(end));
    }

    #[test]
    fn test_no_planned_end() {
        let state = MeetingSetup::titled("Open").into_state(Utc::now());
        assert!(state.end_time.is_none());
        assert!(state.agenda.is_empty());
    }

    #[test]
    fn test_transcript_input_keeps_timestamp() {
        let raw = r#"{"speaker": "Alex", "text": "Hi", "timestamp": "2024-05-01T10:00:00Z", "confidence": 0.9}"#;
        let entry: TranscriptEntry = serde_json::from_str::<TranscriptInput>(raw).unwrap().into();
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert_eq!(entry.confidence, Some(0.9));
        assert!(entry.id.starts_with("transcript_"));
    }
}
