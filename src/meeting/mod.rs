//! Live meeting model and orchestration.
//!
//! A [`MeetingAssistant`] owns one meeting's state behind a
//! [`MeetingStateHandle`], runs the analyzers on every transcript entry and
//! produces the end-of-meeting [`MeetingSummary`].

pub mod assistant;
pub mod input;
pub mod state;
pub mod summary;
pub mod types;

pub use assistant::{AssistantSettings, MeetingAssistant, ProcessOutcome};
pub use input::{AgendaInput, AttendeeInput, DecisionInput, MeetingSetup, TranscriptInput};
pub use state::MeetingStateHandle;
pub use summary::MeetingSummary;
pub use types::{
    new_id, ActionItem, ActionItemUpdate, ActionStatus, AgendaItem, Attendee, Decision,
    MeetingState, Priority, Suggestion, SuggestionType, TranscriptEntry,
};
