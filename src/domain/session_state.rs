use std::ops::{Deref, DerefMut};

use super::{
    analysis::AnalysisResult,
    category_breakdown::{self, CategoryShare},
    message::Message,
    message_log::MessageLog,
};

/// Observable state of one assistant session.
///
/// All mutation goes through the transition methods below. `busy` is only
/// ever raised by [`SessionState::begin_flight`] and lowered when the
/// returned [`Flight`] is dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    messages: MessageLog,
    draft: String,
    busy: bool,
    analysis: Option<AnalysisResult>,
}

impl SessionState {
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Percentage view of the stored analysis, recomputed on every call.
    pub fn category_breakdown(&self) -> Option<Vec<CategoryShare>> {
        self.analysis
            .as_ref()
            .map(|analysis| category_breakdown::breakdown(&analysis.categories))
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.append(message);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Marks the session busy and returns a guard that clears the flag on drop.
    ///
    /// Returns `None` when another flight is already in progress.
    pub fn begin_flight(&mut self) -> Option<Flight<'_>> {
        if self.busy {
            return None;
        }

        self.set_busy(true);
        Some(Flight { state: self })
    }
}

/// Exclusive access to a busy session for the duration of one request.
///
/// Dropping the guard clears `busy`, whether the flow resolved, failed,
/// unwound or was cancelled by dropping its future.
#[derive(Debug)]
pub struct Flight<'a> {
    state: &'a mut SessionState,
}

impl Deref for Flight<'_> {
    type Target = SessionState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for Flight<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        self.state.set_busy(false);
    }
}
