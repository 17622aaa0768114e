//! Analysis flow: one guarded request that stores a spending analysis.
//!
//! Trigger appends the user's request and raises `busy`; resolution records
//! either the analysis with a composed summary reply or a generic error
//! reply. `busy` is released by the [`Flight`] guard on every exit path.

use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::AnalysisResult,
    message::Message,
    session_state::{Flight, SessionState},
};

use super::{
    contracts::AssistantSourceError,
    outcome::{FlowOutcome, RejectReason},
};

pub const ANALYZE_REQUEST_TEXT: &str = "Please analyze my transactions.";
pub const ANALYZE_FAILED_REPLY: &str =
    "Sorry, I couldn't analyze your transactions right now. Please try again.";

const ANALYZE_REQUEST_FAILED: &str = "ANALYZE_REQUEST_FAILED";

/// Whether a session may run the analysis again after a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzePolicy {
    /// At most one stored analysis per session.
    #[default]
    OneShot,
    /// Every successful run replaces the stored analysis.
    Repeatable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeFlow {
    policy: AnalyzePolicy,
    currency: String,
}

impl AnalyzeFlow {
    pub fn new(policy: AnalyzePolicy, currency: impl Into<String>) -> Self {
        Self {
            policy,
            currency: currency.into(),
        }
    }

    pub fn policy(&self) -> AnalyzePolicy {
        self.policy
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn guard(&self, state: &SessionState) -> Result<(), RejectReason> {
        if state.is_busy() {
            return Err(RejectReason::Busy);
        }

        if self.policy == AnalyzePolicy::OneShot && state.analysis().is_some() {
            return Err(RejectReason::AlreadyAnalyzed);
        }

        Ok(())
    }

    /// Runs the synchronous half of the flow.
    pub fn begin<'a>(
        &'a self,
        state: &'a mut SessionState,
    ) -> Result<PendingAnalyze<'a>, RejectReason> {
        self.guard(state)?;

        let mut flight = state.begin_flight().ok_or(RejectReason::Busy)?;
        flight.append_message(Message::user(ANALYZE_REQUEST_TEXT));

        Ok(PendingAnalyze {
            flight,
            currency: &self.currency,
        })
    }
}

/// An analysis request between trigger and resolution.
#[derive(Debug)]
pub struct PendingAnalyze<'a> {
    flight: Flight<'a>,
    currency: &'a str,
}

impl PendingAnalyze<'_> {
    pub fn state(&self) -> &SessionState {
        &self.flight
    }

    pub fn resolve(mut self, result: Result<AnalysisResult, AssistantSourceError>) -> FlowOutcome {
        match result {
            Ok(analysis) => {
                let reply = compose_analysis_reply(&analysis, self.currency);
                tracing::info!(
                    categories = analysis.categories.len(),
                    "analysis stored for session"
                );
                self.flight.set_analysis(analysis);
                self.flight.append_message(Message::assistant(reply));
                FlowOutcome::Completed
            }
            Err(error) => {
                tracing::warn!(
                    code = ANALYZE_REQUEST_FAILED,
                    source_code = error.code(),
                    error = %error,
                    "analysis request failed"
                );
                self.flight.append_message(Message::assistant(ANALYZE_FAILED_REPLY));
                FlowOutcome::Failed(error)
            }
        }
    }
}

/// Builds the assistant reply: the summary followed by one line per category.
pub fn compose_analysis_reply(analysis: &AnalysisResult, currency: &str) -> String {
    let lines = analysis
        .categories
        .iter()
        .map(|category| category.display_line(currency))
        .collect::<Vec<_>>()
        .join("\n");

    [analysis.summary.as_str(), lines.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}
