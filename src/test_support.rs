use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    domain::analysis::AnalysisResult,
    usecases::contracts::{AssistantSourceError, AssistantTransport, ChatReply},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Analyze { session_id: String },
    Chat { session_id: String, message: String },
}

/// Scripted assistant service: replies are consumed in order, calls are recorded.
#[derive(Default)]
pub struct StubTransport {
    analyze_results: Mutex<VecDeque<Result<AnalysisResult, AssistantSourceError>>>,
    chat_results: Mutex<VecDeque<Result<ChatReply, AssistantSourceError>>>,
    calls: Mutex<Vec<TransportCall>>,
    gate: Option<Arc<Notify>>,
}

impl StubTransport {
    pub fn with_analyze(self, result: Result<AnalysisResult, AssistantSourceError>) -> Self {
        self.analyze_results
            .lock()
            .expect("analyze results lock")
            .push_back(result);
        self
    }

    pub fn with_chat(self, result: Result<ChatReply, AssistantSourceError>) -> Self {
        self.chat_results
            .lock()
            .expect("chat results lock")
            .push_back(result);
        self
    }

    /// Holds every response until the gate is notified once per request.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl AssistantTransport for StubTransport {
    async fn analyze(&self, session_id: &str) -> Result<AnalysisResult, AssistantSourceError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(TransportCall::Analyze {
                session_id: session_id.to_owned(),
            });
        self.wait_for_gate().await;

        self.analyze_results
            .lock()
            .expect("analyze results lock")
            .pop_front()
            .unwrap_or_else(|| Err(AssistantSourceError::Transport("no scripted reply".into())))
    }

    async fn chat(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatReply, AssistantSourceError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(TransportCall::Chat {
                session_id: session_id.to_owned(),
                message: message.to_owned(),
            });
        self.wait_for_gate().await;

        self.chat_results
            .lock()
            .expect("chat results lock")
            .pop_front()
            .unwrap_or_else(|| Err(AssistantSourceError::Transport("no scripted reply".into())))
    }
}
