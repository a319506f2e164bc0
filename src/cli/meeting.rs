//! CLI handler for meeting commands.
//!
//! All commands talk to a running service over its HTTP API.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use crate::cli::args::{MeetingCliArgs, MeetingCommand};
use crate::meeting::{MeetingState, Suggestion};

pub async fn handle_meeting_command(args: MeetingCliArgs) -> Result<()> {
    let client = MeetingClient::new(&args.url);
    match args.command {
        MeetingCommand::Start {
            title,
            attendees,
            agenda,
            duration,
        } => client.start(title, attendees, agenda, duration).await,
        MeetingCommand::State => client.show_state().await,
        MeetingCommand::Say { speaker, text } => client.say(speaker, text).await,
        MeetingCommand::Ack { id } => client.acknowledge(&id).await,
        MeetingCommand::End => client.end().await,
        MeetingCommand::Summary { text } => client.summary(text).await,
    }
}

struct MeetingClient {
    client: reqwest::Client,
    base_url: String,
}

impl MeetingClient {
    fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn start(
        &self,
        title: String,
        attendees: Vec<String>,
        agenda: Vec<String>,
        duration: Option<u32>,
    ) -> Result<()> {
        let body = json!({
            "title": title,
            "attendees": attendees.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
            "agenda": agenda.iter().map(|title| json!({ "title": title })).collect::<Vec<_>>(),
            "durationMinutes": duration,
        });

        let response = self
            .client
            .post(self.url("/meeting"))
            .json(&body)
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        let json = read_json(response, "start meeting").await?;
        let state: MeetingState =
            serde_json::from_value(json).context("Unexpected meeting state response")?;

        println!("Meeting started: {} (id: {})", state.title, state.id);
        if let Some(item) = state.current_agenda() {
            println!("Current agenda item: {}", item.title);
        }

        Ok(())
    }

    async fn show_state(&self) -> Result<()> {
        let response = self
            .client
            .get(self.url("/meeting"))
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        let json = read_json(response, "read meeting").await?;
        let state: MeetingState =
            serde_json::from_value(json).context("Unexpected meeting state response")?;

        println!(
            "Meeting: {} ({})",
            state.title,
            if state.is_active { "active" } else { "ended" }
        );
        println!("Started: {}", state.start_time.format("%Y-%m-%d %H:%M UTC"));
        for (index, item) in state.agenda.iter().enumerate() {
            let marker = if index == state.current_agenda_item { ">" } else { " " };
            println!("{} {}. {}", marker, index + 1, item.title);
        }
        println!(
            "Transcript: {} entries | Decisions: {} | Action items: {}",
            state.transcript.len(),
            state.decisions.len(),
            state.action_items.len()
        );

        let pending: Vec<&Suggestion> = state
            .suggestions_newest_first()
            .into_iter()
            .filter(|s| !s.is_acknowledged)
            .collect();
        if !pending.is_empty() {
            println!("\nUnacknowledged suggestions:");
            for suggestion in pending {
                print_suggestion(suggestion);
            }
        }

        Ok(())
    }

    async fn say(&self, speaker: String, text: String) -> Result<()> {
        let response = self
            .client
            .post(self.url("/transcript"))
            .json(&json!({ "speaker": speaker, "text": text }))
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        let json = read_json(response, "add transcript entry").await?;
        let suggestions: Vec<Suggestion> = json
            .get("suggestions")
            .cloned()
            .map(serde_json::from_value::<Vec<Suggestion>>)
            .transpose()
            .context("Unexpected transcript response")?
            .unwrap_or_default();

        if suggestions.is_empty() {
            println!("No new suggestions.");
        }
        for suggestion in &suggestions {
            print_suggestion(suggestion);
        }

        Ok(())
    }

    async fn acknowledge(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url(&format!("/suggestions/{}/acknowledge", id)))
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        read_json(response, "acknowledge suggestion").await?;
        println!("Acknowledged {}", id);
        Ok(())
    }

    async fn end(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/meeting/end"))
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        let json = read_json(response, "end meeting").await?;
        println!(
            "{}",
            json.get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Meeting ended")
        );
        Ok(())
    }

    async fn summary(&self, text: bool) -> Result<()> {
        let format = if text { "text" } else { "json" };
        let response = self
            .client
            .get(self.url(&format!("/meeting/summary?format={}", format)))
            .send()
            .await
            .context("Failed to connect to facilitator service. Is it running?")?;

        if text && response.status().is_success() {
            println!("{}", response.text().await?);
            return Ok(());
        }

        let json = read_json(response, "generate summary").await?;
        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }
}

async fn read_json(response: reqwest::Response, action: &str) -> Result<Value> {
    let status = response.status();
    let json: Value = response
        .json()
        .await
        .with_context(|| format!("Failed to read response to {}", action))?;

    if !status.is_success() {
        bail!(
            "Failed to {}: {}",
            action,
            json.get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
        );
    }

    Ok(json)
}

pub(crate) fn print_suggestion(suggestion: &Suggestion) {
    println!(
        "  [{}] {} ({}): {}",
        suggestion.priority.as_str(),
        suggestion.title,
        suggestion.kind.as_str(),
        suggestion.message
    );
    println!("        id: {}", suggestion.id);
}
