//! Heuristic transcript analyzers.
//!
//! Every analyzer sees the same meeting snapshot and returns suggestions
//! plus a state patch. The orchestrator runs them in the order returned by
//! [`default_analyzers`] and merges the results.

pub mod action_items;
pub mod ambiguity;
pub mod finalization;
pub mod goal_drift;
pub mod lexicon;
pub mod specificity;
pub mod text;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::meeting::{ActionItem, MeetingState, Suggestion};

pub use action_items::ActionItemExtractor;
pub use ambiguity::AmbiguityDetector;
pub use finalization::FinalizationRecommender;
pub use goal_drift::GoalDriftTracker;
pub use specificity::SpecificityProposer;

/// Inputs shared by all analyzers for a single run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext {
    /// Wall-clock time of the run. Relative deadlines and elapsed-time
    /// checks are computed against it.
    pub now: DateTime<Utc>,
}

impl AnalysisContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

/// Fields an analyzer may add to the meeting state. Lists are appended by
/// the orchestrator, never assigned over.
#[derive(Debug, Default, Clone)]
pub struct StatePatch {
    /// Appended to the action-item list after a final duplicate check.
    pub new_action_items: Vec<ActionItem>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self.new_action_items.is_empty()
    }
}

#[derive(Debug, Default, Clone)]
pub struct AnalyzerOutput {
    pub suggestions: Vec<Suggestion>,
    pub patch: StatePatch,
}

impl AnalyzerOutput {
    pub fn suggestions(suggestions: Vec<Suggestion>) -> Self {
        Self {
            suggestions,
            patch: StatePatch::default(),
        }
    }
}

/// One pass over the meeting state.
pub trait Analyzer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn analyze(&self, state: &MeetingState, ctx: &AnalysisContext) -> Result<AnalyzerOutput>;
}

/// The built-in pipeline in its fixed order.
pub fn default_analyzers() -> Result<Vec<Box<dyn Analyzer>>> {
    Ok(vec![
        Box::new(AmbiguityDetector::new()),
        Box::new(GoalDriftTracker::new()),
        Box::new(ActionItemExtractor::new()?),
        Box::new(SpecificityProposer::new()),
        Box::new(FinalizationRecommender::new()),
    ])
}
