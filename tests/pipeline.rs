use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::sync::{Arc, Mutex};

use facilitator::analysis::{AnalysisContext, Analyzer, AnalyzerOutput};
use facilitator::insight::{CompletionRequest, DisabledProvider, InsightError, InsightProvider};
use facilitator::meeting::{
    ActionItem, AgendaInput, AssistantSettings, Decision, MeetingAssistant, MeetingSetup,
    MeetingState, Priority, Suggestion, SuggestionType, TranscriptEntry,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap()
}

fn budget_meeting() -> MeetingState {
    MeetingSetup {
        agenda: vec![AgendaInput {
            title: "Budget Review".to_string(),
            description: None,
            duration: None,
        }],
        ..MeetingSetup::titled("Finance sync")
    }
    .into_state(t0())
}

fn offline(state: MeetingState) -> MeetingAssistant {
    MeetingAssistant::new(state, Arc::new(DisabledProvider), AssistantSettings::default()).unwrap()
}

fn count(suggestions: &[Suggestion], kind: SuggestionType) -> usize {
    suggestions.iter().filter(|s| s.kind == kind).count()
}

fn drift_count(suggestions: &[Suggestion]) -> usize {
    suggestions
        .iter()
        .filter(|s| s.title == "Conversation Drifting Off-Topic")
        .count()
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let assistant = offline(budget_meeting());
    let lines = [
        "I will send the report by tomorrow.",
        "That's off-topic, by the way.",
        "That's off-topic, by the way.",
        "That's off-topic, by the way.",
    ];

    let mut batches = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let now = t0() + Duration::minutes(i as i64);
        let entry = TranscriptEntry::at("Alex", *line, now);
        batches.push(assistant.process_transcript_at(entry, now).await);
    }

    assert_eq!(count(&batches[0].suggestions, SuggestionType::ActionItem), 1);
    for batch in &batches[1..] {
        assert_eq!(count(&batch.suggestions, SuggestionType::ActionItem), 0);
    }
    // The first statement shares no keywords with "Budget Review", so it
    // opens the off-topic run and drift is already reported at the third
    // entry. It keeps firing while the run lasts.
    assert_eq!(drift_count(&batches[1].suggestions), 0);
    assert_eq!(drift_count(&batches[2].suggestions), 1);
    assert_eq!(drift_count(&batches[3].suggestions), 1);

    let state = assistant.snapshot().await;
    assert_eq!(state.transcript.len(), 4);
    assert_eq!(state.action_items.len(), 1);
    let item = &state.action_items[0];
    assert!(item.assignees.contains(&"I will".to_string()));
    assert_eq!(item.deadline, NaiveDate::from_ymd_opt(2024, 2, 1));

    let total: usize = batches.iter().map(|b| b.suggestions.len()).sum();
    assert_eq!(state.suggestions.len(), total);
}

#[tokio::test]
async fn test_acknowledge_twice_equals_once() {
    let assistant = offline(budget_meeting());
    let outcome = assistant
        .process_transcript(TranscriptEntry::new("Alex", "We should probably fix it soon."))
        .await;
    let id = outcome.suggestions[0].id.clone();

    assistant.acknowledge_suggestion(&id).await;
    let once = serde_json::to_value(assistant.snapshot().await).unwrap();
    assistant.acknowledge_suggestion(&id).await;
    let twice = serde_json::to_value(assistant.snapshot().await).unwrap();
    assert_eq!(once, twice);

    assistant.acknowledge_suggestion("does-not-exist").await;
    assert_eq!(serde_json::to_value(assistant.snapshot().await).unwrap(), twice);
}

#[tokio::test]
async fn test_similar_action_item_is_not_added_twice() {
    let mut state = budget_meeting();
    state.action_items.push(ActionItem::new("Send the weekly report"));
    let assistant = offline(state);

    let outcome = assistant
        .process_transcript(TranscriptEntry::new("Alex", "I will send weekly report."))
        .await;

    assert_eq!(count(&outcome.suggestions, SuggestionType::ActionItem), 0);
    assert_eq!(assistant.snapshot().await.action_items.len(), 1);
}

#[tokio::test]
async fn test_on_topic_entry_breaks_drift() {
    let state = MeetingSetup {
        agenda: vec![AgendaInput {
            title: "Budget Review".to_string(),
            description: Some("quarterly marketing numbers".to_string()),
            duration: None,
        }],
        ..MeetingSetup::titled("Finance sync")
    }
    .into_state(t0());
    let assistant = offline(state);

    let off = "Speaking of vacations, anyone been to Lisbon?";
    let on = "Budget review numbers for marketing";
    for line in [off, off, on, off, off] {
        let outcome = assistant
            .process_transcript_at(TranscriptEntry::at("Lee", line, t0()), t0())
            .await;
        assert_eq!(drift_count(&outcome.suggestions), 0);
    }
}

#[tokio::test]
async fn test_deadlines_resolve_against_call_time() {
    let cases = [
        ("I will send the slides tomorrow.", NaiveDate::from_ymd_opt(2024, 2, 1)),
        ("We should finish the design next month.", NaiveDate::from_ymd_opt(2024, 2, 29)),
        ("Jo will finish the review in 3 days.", NaiveDate::from_ymd_opt(2024, 2, 3)),
        ("Jo will finish the review next Friday.", None),
    ];

    for (line, expected) in cases {
        let assistant = offline(MeetingSetup::titled("Planning").into_state(t0()));
        assistant
            .process_transcript_at(TranscriptEntry::at("Jo", line, t0()), t0())
            .await;

        let state = assistant.snapshot().await;
        assert_eq!(state.action_items.len(), 1, "no action item for {:?}", line);
        assert_eq!(state.action_items[0].deadline, expected, "deadline for {:?}", line);
    }
}

#[tokio::test]
async fn test_weak_verb_suggests_four_alternatives() {
    let assistant = offline(MeetingSetup::titled("Vendors").into_state(t0()));
    let outcome = assistant
        .process_transcript(TranscriptEntry::new("Kai", "We should look into the vendor issue"))
        .await;

    let weak: Vec<&Suggestion> = outcome
        .suggestions
        .iter()
        .filter(|s| s.title == "Weak Action Verb Detected")
        .collect();
    assert_eq!(weak.len(), 1);
    assert_eq!(weak[0].kind, SuggestionType::Specificity);
    assert!(weak[0]
        .message
        .contains("investigate, research, analyze, examine"));
}

#[tokio::test]
async fn test_finalization_near_planned_end() {
    let mut state = MeetingSetup::titled("Quarterly planning").into_state(t0());
    state.end_time = Some(t0() + Duration::minutes(100));
    state.decisions.push(Decision::new("Adopt the new vendor"));
    state.action_items.push(ActionItem::new("Draft the vendor contract"));
    let assistant = offline(state);

    let now = t0() + Duration::minutes(85);
    let outcome = assistant
        .process_transcript_at(TranscriptEntry::at("Ravi", "Any other comments?", now), now)
        .await;

    let titles: Vec<&str> = outcome
        .suggestions
        .iter()
        .filter(|s| s.kind == SuggestionType::Finalization)
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Verify Decisions", "Verify Action Items", "Plan Next Steps"]
    );
}

struct FailingAnalyzer;

impl Analyzer for FailingAnalyzer {
    fn name(&self) -> &'static str {
        "FailingAnalyzer"
    }

    fn analyze(&self, _state: &MeetingState, _ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        bail!("lexicon unavailable")
    }
}

struct EchoAnalyzer;

impl Analyzer for EchoAnalyzer {
    fn name(&self) -> &'static str {
        "EchoAnalyzer"
    }

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput> {
        let last = state.transcript.last().map(|e| e.text.clone()).unwrap_or_default();
        Ok(AnalyzerOutput::suggestions(vec![Suggestion::new(
            "echo",
            SuggestionType::Ambiguity,
            "Echo",
            last,
            Priority::Low,
            ctx.now,
        )]))
    }
}

#[tokio::test]
async fn test_failing_analyzer_does_not_drop_others() {
    let assistant = MeetingAssistant::with_analyzers(
        MeetingSetup::titled("Isolation").into_state(t0()),
        vec![
            Box::new(EchoAnalyzer),
            Box::new(FailingAnalyzer),
            Box::new(EchoAnalyzer),
        ],
        Arc::new(DisabledProvider),
        AssistantSettings::default(),
    );

    let outcome = assistant
        .process_transcript(TranscriptEntry::new("Ana", "hello there"))
        .await;
    assert_eq!(outcome.suggestions.len(), 2);
    assert!(outcome.suggestions.iter().all(|s| s.message == "hello there"));
    assert_eq!(outcome.state.suggestions.len(), 2);
}

#[derive(Default)]
struct RecordingProvider {
    requests: Mutex<Vec<CompletionRequest>>,
}

#[async_trait]
impl InsightProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, InsightError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok("Ask Alex to confirm the report deadline.".to_string())
    }
}

#[tokio::test]
async fn test_insight_request_carries_meeting_context() {
    let provider = Arc::new(RecordingProvider::default());
    let assistant = MeetingAssistant::new(
        budget_meeting(),
        provider.clone(),
        AssistantSettings::default(),
    )
    .unwrap();

    let outcome = assistant
        .process_transcript(TranscriptEntry::new("Alex", "I will send the report by tomorrow."))
        .await;

    let last = outcome.suggestions.last().unwrap();
    assert_eq!(last.kind, SuggestionType::AiInsight);
    assert_eq!(last.message, "Ask Alex to confirm the report deadline.");

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(request.system.contains("Current agenda item: Budget Review"));
    assert!(request.system.contains("Current action items: Send the report by tomorrow"));
    assert!(request
        .user
        .contains("\"Alex: I will send the report by tomorrow.\""));
    assert!(request.user.contains("New Action Item Identified"));
    assert_eq!(request.max_tokens, 500);
}

#[tokio::test]
async fn test_summary_keeps_structured_fields_on_failure() {
    let mut state = budget_meeting();
    state.decisions.push(Decision::new("Freeze hiring"));
    let assistant = offline(state);

    let summary = assistant
        .generate_summary_at(t0() + Duration::minutes(47))
        .await;
    assert_eq!(summary.summary, "Error generating summary");
    assert_eq!(summary.title, "Finance sync");
    assert_eq!(summary.duration, 47);
    assert_eq!(summary.decisions.len(), 1);
}
