//! Offline replay of a recorded transcript through the analyzer pipeline.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::args::ReplayCliArgs;
use crate::cli::meeting::print_suggestion;
use crate::config::Config;
use crate::insight::{self, DisabledProvider, InsightProvider};
use crate::meeting::{
    AssistantSettings, MeetingAssistant, MeetingSetup, ProcessOutcome, TranscriptInput,
};

pub async fn handle_replay_command(args: ReplayCliArgs) -> Result<()> {
    let inputs = load_transcript(&args.transcript)?;
    let setup = match &args.meeting {
        Some(path) => load_setup(path)?,
        None => MeetingSetup::titled(default_title(&args.transcript)),
    };

    let (provider, settings) = if args.no_insight {
        (
            Arc::new(DisabledProvider) as Arc<dyn InsightProvider>,
            AssistantSettings::default(),
        )
    } else {
        let config = Config::load()?;
        (
            insight::from_config(&config.insight)?,
            AssistantSettings::from_config(&config.insight),
        )
    };

    let start = replay_start(&inputs);
    let assistant = MeetingAssistant::new(setup.into_state(start), provider, settings)?;

    info!("Replaying {} transcript entries", inputs.len());
    let outcomes = replay(&assistant, inputs).await;

    for outcome in &outcomes {
        if let Some(entry) = outcome.state.transcript.last() {
            println!("{}", entry.line());
        }
        for suggestion in &outcome.suggestions {
            print_suggestion(suggestion);
        }
    }

    let end = outcomes
        .last()
        .and_then(|o| o.state.transcript.last())
        .map(|entry| entry.timestamp)
        .unwrap_or(start);
    let summary = assistant.generate_summary_at(end).await;
    println!("\n{}", summary.to_text());

    Ok(())
}

/// Feed every entry in order. Each entry is analyzed as of its own
/// timestamp so relative deadlines and elapsed-time checks match the
/// recorded meeting.
pub async fn replay(
    assistant: &MeetingAssistant,
    inputs: Vec<TranscriptInput>,
) -> Vec<ProcessOutcome> {
    let mut outcomes = Vec::with_capacity(inputs.len());
    for input in inputs {
        let now = input.timestamp.unwrap_or_else(Utc::now);
        outcomes.push(assistant.process_transcript_at(input.into(), now).await);
    }
    outcomes
}

/// Meeting start for a replay: the first entry's timestamp when present.
pub fn replay_start(inputs: &[TranscriptInput]) -> DateTime<Utc> {
    inputs
        .first()
        .and_then(|input| input.timestamp)
        .unwrap_or_else(Utc::now)
}

fn load_transcript(path: &Path) -> Result<Vec<TranscriptInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript file {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse transcript file {:?}", path))
}

fn load_setup(path: &Path) -> Result<MeetingSetup> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read meeting file {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse meeting file {:?}", path))
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Replay".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::SuggestionType;
    use chrono::TimeZone;

    #[test]
    fn test_load_transcript_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standup.json");
        std::fs::write(
            &path,
            r#"[{"speaker": "Alex", "text": "Morning all", "timestamp": "2024-05-01T09:00:00Z"},
                {"speaker": "Sam", "text": "Hi"}]"#,
        )
        .unwrap();

        let inputs = load_transcript(&path).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(
            replay_start(&inputs),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
        );
        assert_eq!(default_title(&path), "standup");
    }

    #[test]
    fn test_malformed_transcript_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_transcript(&path).is_err());
    }

    #[tokio::test]
    async fn test_replay_uses_entry_timestamps() {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut input = TranscriptInput::new("Alex", "I will send the report tomorrow");
        input.timestamp = Some(start);

        let assistant = MeetingAssistant::new(
            MeetingSetup::titled("Standup").into_state(start),
            Arc::new(DisabledProvider),
            AssistantSettings::default(),
        )
        .unwrap();

        let outcomes = replay(&assistant, vec![input]).await;
        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0]
            .suggestions
            .iter()
            .any(|s| s.kind == SuggestionType::ActionItem));

        let state = assistant.snapshot().await;
        assert_eq!(
            state.action_items[0].deadline,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 2)
        );
    }
}
