//! Meeting data model shared by the analyzers, the orchestrator and the API.
//!
//! Field names serialize as camelCase so the dashboard can consume the
//! state as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Build a stable, unique id with a readable prefix, e.g. `weak_verb_3f2a...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    Ambiguity,
    GoalTracking,
    ActionItem,
    Specificity,
    Finalization,
    AiInsight,
}

impl SuggestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ambiguity => "ambiguity",
            Self::GoalTracking => "goal_tracking",
            Self::ActionItem => "action_item",
            Self::Specificity => "specificity",
            Self::Finalization => "finalization",
            Self::AiInsight => "ai_insight",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ambiguity" => Some(Self::Ambiguity),
            "goal_tracking" => Some(Self::GoalTracking),
            "action_item" => Some(Self::ActionItem),
            "specificity" => Some(Self::Specificity),
            "finalization" => Some(Self::Finalization),
            "ai_insight" => Some(Self::AiInsight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_organizer: bool,
    #[serde(default = "default_present")]
    pub is_present: bool,
}

fn default_present() -> bool {
    true
}

impl Attendee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id("attendee"),
            name: name.into(),
            email: String::new(),
            is_organizer: false,
            is_present: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Planned duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl AgendaItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id("agenda"),
            title: title.into(),
            description: None,
            duration: None,
            is_completed: false,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub speaker: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl TranscriptEntry {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self::at(speaker, text, Utc::now())
    }

    pub fn at(speaker: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: new_id("transcript"),
            timestamp,
            speaker: speaker.into(),
            text: text.into(),
            confidence: None,
        }
    }

    /// `speaker: text`, the form used in prompts and summaries.
    pub fn line(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub is_verified: bool,
}

impl Decision {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id("decision"),
            title: title.into(),
            description: String::new(),
            timestamp: Utc::now(),
            participants: Vec::new(),
            is_verified: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub task: String,
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub priority: Priority,
    #[serde(default)]
    pub status: ActionStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_verified: bool,
}

impl ActionItem {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            id: new_id("action"),
            task: task.into(),
            assignees: Vec::new(),
            deadline: None,
            priority: Priority::Low,
            status: ActionStatus::Pending,
            timestamp: Utc::now(),
            is_verified: false,
        }
    }

    pub fn apply(&mut self, update: ActionItemUpdate) {
        if let Some(task) = update.task {
            self.task = task;
        }
        if let Some(assignees) = update.assignees {
            self.assignees = assignees;
        }
        if let Some(deadline) = update.deadline {
            self.deadline = deadline;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(is_verified) = update.is_verified {
            self.is_verified = is_verified;
        }
    }
}

/// Partial update for an action item. Absent fields are left untouched.
/// An explicit `"deadline": null` clears the deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemUpdate {
    pub task: Option<String>,
    pub assignees: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub status: Option<ActionStatus>,
    pub is_verified: Option<bool>,
}

/// Marks a field as present, keeping a JSON `null` distinct from absence.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_acknowledged: bool,
}

impl Suggestion {
    pub fn new(
        id_prefix: &str,
        kind: SuggestionType,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(id_prefix),
            kind,
            title: title.into(),
            message: message.into(),
            priority,
            timestamp,
            is_acknowledged: false,
        }
    }
}

/// Canonical state of one meeting. Mutated only through the orchestrator
/// and its state handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingState {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    /// Planned end of the meeting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub agenda: Vec<AgendaItem>,
    #[serde(default)]
    pub current_agenda_item: usize,
    #[serde(default)]
    pub transcript: Vec<TranscriptEntry>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl MeetingState {
    pub fn new(title: impl Into<String>, attendees: Vec<Attendee>, agenda: Vec<AgendaItem>) -> Self {
        Self {
            id: new_id("meeting"),
            title: title.into(),
            start_time: Utc::now(),
            end_time: None,
            attendees,
            agenda,
            current_agenda_item: 0,
            transcript: Vec::new(),
            decisions: Vec::new(),
            action_items: Vec::new(),
            suggestions: Vec::new(),
            is_active: true,
        }
    }

    pub fn current_agenda(&self) -> Option<&AgendaItem> {
        self.agenda.get(self.current_agenda_item)
    }

    /// The last `n` transcript entries, oldest first.
    pub fn recent_transcript(&self, n: usize) -> &[TranscriptEntry] {
        let start = self.transcript.len().saturating_sub(n);
        &self.transcript[start..]
    }

    /// Suggestions in presentation order: most recent first.
    pub fn suggestions_newest_first(&self) -> Vec<&Suggestion> {
        self.suggestions.iter().rev().collect()
    }
}
