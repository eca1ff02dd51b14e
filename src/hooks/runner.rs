//! Hook runner: routes one host event to its classifier and dispatches the
//! resulting records.

use crate::config::HooksConfig;
use crate::dispatch::{dispatch, KnowledgeSink};
use crate::error::Result;
use crate::extraction::{Extractor, InsightEmitter};
use crate::knowledge::KnowledgeRecord;
use crate::session::{session_started, ProjectDetector, SessionAggregator, SessionEvent};
use crate::tools::{ToolClassifier, ToolEvent};
use chrono::{DateTime, Local, TimeZone};
use std::path::PathBuf;

use super::payload::AssistantResponse;

/// Where a hook runs and how it is configured
#[derive(Debug, Clone)]
pub struct HookContext {
    pub project_dir: PathBuf,
    pub config: HooksConfig,
}

impl HookContext {
    pub fn new(project_dir: impl Into<PathBuf>, config: HooksConfig) -> Self {
        Self {
            project_dir: project_dir.into(),
            config,
        }
    }
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookOutcome {
    /// Records the classifier produced
    pub produced: usize,
    /// Records the sink accepted
    pub accepted: usize,
}

/// Handles host events against a knowledge sink
pub struct HookRunner<'a> {
    sink: &'a dyn KnowledgeSink,
    extractor: Extractor,
    emitter: InsightEmitter,
    context: HookContext,
}

impl<'a> HookRunner<'a> {
    pub fn new(sink: &'a dyn KnowledgeSink, context: HookContext) -> Result<Self> {
        Ok(Self {
            sink,
            extractor: Extractor::new()?,
            emitter: InsightEmitter::new(context.config.extraction.clone()),
            context,
        })
    }

    /// Extract insights from an assistant response
    pub fn assistant_response(&self, payload: &AssistantResponse) -> Result<HookOutcome> {
        let records = self
            .emitter
            .analyze_response(&self.extractor, &payload.response_text);
        Ok(self.deliver(&records))
    }

    /// Record what a completed tool call reveals about the project
    pub fn tool_complete(&self, event: &ToolEvent) -> Result<HookOutcome> {
        let records = ToolClassifier::classify(event);
        Ok(self.deliver(&records))
    }

    /// Announce the session and record detected project settings
    pub fn session_start(&self) -> Result<HookOutcome> {
        let mut records = vec![session_started()];
        records.extend(ProjectDetector::detect(&self.context.project_dir));
        Ok(self.deliver(&records))
    }

    /// Summarize a finished session, stamped with local time
    pub fn session_end(&self, event: &SessionEvent) -> Result<HookOutcome> {
        self.session_end_at(event, &Local::now())
    }

    pub fn session_end_at<Tz>(&self, event: &SessionEvent, now: &DateTime<Tz>) -> Result<HookOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let records = SessionAggregator::summarize(event, now);
        Ok(self.deliver(&records))
    }

    /// Each record is dispatched on its own; a failure never stops the rest.
    fn deliver(&self, records: &[KnowledgeRecord]) -> HookOutcome {
        let accepted = records
            .iter()
            .filter(|record| dispatch(self.sink, record).is_some())
            .count();

        HookOutcome {
            produced: records.len(),
            accepted,
        }
    }
}

/// Run a hook and absorb any failure.
///
/// Hooks are advisory: the host session must never see an error from here.
pub fn run_advisory<F>(event: &str, hook: F) -> Option<HookOutcome>
where
    F: FnOnce() -> Result<HookOutcome>,
{
    match hook() {
        Ok(outcome) => {
            tracing::debug!(
                hook = event,
                produced = outcome.produced,
                accepted = outcome.accepted,
                "Hook completed"
            );
            Some(outcome)
        }
        Err(e) => {
            tracing::debug!(hook = event, error = %e, "Hook failed");
            None
        }
    }
}
