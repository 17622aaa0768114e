//! Chat flow: send the current draft and record the assistant's reply.

use crate::domain::{
    message::Message,
    session_state::{Flight, SessionState},
};

use super::{
    contracts::{AssistantSourceError, ChatReply},
    outcome::{FlowOutcome, RejectReason},
};

pub const CHAT_FAILED_REPLY: &str =
    "Sorry, I couldn't reach the assistant right now. Please try again.";

const CHAT_REQUEST_FAILED: &str = "CHAT_REQUEST_FAILED";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatFlow;

impl ChatFlow {
    pub fn guard(&self, state: &SessionState) -> Result<(), RejectReason> {
        if state.draft().trim().is_empty() {
            return Err(RejectReason::EmptyDraft);
        }

        if state.is_busy() {
            return Err(RejectReason::Busy);
        }

        Ok(())
    }

    /// Captures the trimmed draft, clears it and appends it as a user turn.
    pub fn begin<'a>(&self, state: &'a mut SessionState) -> Result<PendingChat<'a>, RejectReason> {
        self.guard(state)?;

        let text = state.draft().trim().to_owned();
        let mut flight = state.begin_flight().ok_or(RejectReason::Busy)?;
        flight.set_draft(String::new());
        flight.append_message(Message::user(text.clone()));

        Ok(PendingChat { flight, text })
    }
}

/// A chat request between trigger and resolution.
#[derive(Debug)]
pub struct PendingChat<'a> {
    flight: Flight<'a>,
    text: String,
}

impl PendingChat<'_> {
    /// The trimmed text that was submitted.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &SessionState {
        &self.flight
    }

    pub fn resolve(mut self, result: Result<ChatReply, AssistantSourceError>) -> FlowOutcome {
        match result {
            Ok(reply) => {
                tracing::debug!(reply_len = reply.content.len(), "chat reply received");
                self.flight.append_message(Message::assistant(reply.content));
                FlowOutcome::Completed
            }
            Err(error) => {
                tracing::warn!(
                    code = CHAT_REQUEST_FAILED,
                    source_code = error.code(),
                    error = %error,
                    "chat request failed"
                );
                self.flight.append_message(Message::assistant(CHAT_FAILED_REPLY));
                FlowOutcome::Failed(error)
            }
        }
    }
}
