use thiserror::Error;

use super::contracts::AssistantSourceError;

/// Why a trigger was refused without touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("another request is still in flight")]
    Busy,
    #[error("draft is empty")]
    EmptyDraft,
    #[error("analysis already completed for this session")]
    AlreadyAnalyzed,
}

impl RejectReason {
    pub fn code(self) -> &'static str {
        match self {
            Self::Busy => "SESSION_BUSY",
            Self::EmptyDraft => "DRAFT_EMPTY",
            Self::AlreadyAnalyzed => "ANALYSIS_ALREADY_COMPLETED",
        }
    }
}

/// Result of triggering a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The request resolved successfully and its result was recorded.
    Completed,
    /// The request failed; a generic reply was recorded instead.
    Failed(AssistantSourceError),
    /// The guard refused the trigger; nothing changed.
    Rejected(RejectReason),
}

impl FlowOutcome {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
