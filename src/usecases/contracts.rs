use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;

const TRANSPORT_FAILURE: &str = "ASSISTANT_TRANSPORT_FAILURE";
const REMOTE_FAILURE: &str = "ASSISTANT_REMOTE_FAILURE";
const MALFORMED_RESPONSE: &str = "ASSISTANT_MALFORMED_RESPONSE";

/// Reply to a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub content: String,
}

impl ChatReply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Failures reported by the assistant service or the path to it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistantSourceError {
    /// Request could not be sent or the response could not be received.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Response arrived with a non-success status.
    #[error("assistant service returned status {status}")]
    Remote { status: u16, body: String },
    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl AssistantSourceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => TRANSPORT_FAILURE,
            Self::Remote { .. } => REMOTE_FAILURE,
            Self::Malformed(_) => MALFORMED_RESPONSE,
        }
    }
}

/// Request/response access to the remote assistant service.
#[async_trait]
pub trait AssistantTransport: Send + Sync {
    /// Requests a spending analysis for the session.
    async fn analyze(&self, session_id: &str) -> Result<AnalysisResult, AssistantSourceError>;

    /// Sends one user message and returns the assistant's reply.
    async fn chat(&self, session_id: &str, message: &str)
        -> Result<ChatReply, AssistantSourceError>;
}

#[async_trait]
impl<T> AssistantTransport for &T
where
    T: AssistantTransport + ?Sized,
{
    async fn analyze(&self, session_id: &str) -> Result<AnalysisResult, AssistantSourceError> {
        (**self).analyze(session_id).await
    }

    async fn chat(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatReply, AssistantSourceError> {
        (**self).chat(session_id, message).await
    }
}
