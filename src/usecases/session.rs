use tokio::sync::watch;

use crate::domain::{
    analysis::AnalysisResult, category_breakdown::CategoryShare, message::Message,
    session_state::SessionState,
};

use super::{
    analyze::{AnalyzeFlow, AnalyzePolicy},
    chat::ChatFlow,
    contracts::AssistantTransport,
    outcome::FlowOutcome,
};

const FLOW_REJECTED: &str = "SESSION_FLOW_REJECTED";

/// Fixed per-session settings supplied at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub session_id: String,
    pub currency: String,
    pub analyze_policy: AnalyzePolicy,
}

/// Owns one session's state and drives the analysis and chat flows.
///
/// Flows take `&mut self`, so at most one request is in flight. State
/// snapshots are published to subscribers after every change.
pub struct SessionController<T> {
    state: SessionState,
    transport: T,
    session_id: String,
    analyze: AnalyzeFlow,
    chat: ChatFlow,
    updates: watch::Sender<SessionState>,
}

impl<T> SessionController<T>
where
    T: AssistantTransport,
{
    pub fn new(transport: T, settings: SessionSettings) -> Self {
        let state = SessionState::default();
        let (updates, _) = watch::channel(state.clone());

        Self {
            state,
            transport,
            session_id: settings.session_id,
            analyze: AnalyzeFlow::new(settings.analyze_policy, settings.currency),
            chat: ChatFlow,
            updates,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn currency(&self) -> &str {
        self.analyze.currency()
    }

    pub fn analyze_policy(&self) -> AnalyzePolicy {
        self.analyze.policy()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        self.state.messages().messages()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn draft(&self) -> &str {
        self.state.draft()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.state.analysis()
    }

    pub fn category_breakdown(&self) -> Option<Vec<CategoryShare>> {
        self.state.category_breakdown()
    }

    /// Returns a receiver that observes every state change.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.set_draft(text);
        publish(&self.updates, &self.state);
    }

    pub async fn submit_analyze(&mut self) -> FlowOutcome {
        let pending = match self.analyze.begin(&mut self.state) {
            Ok(pending) => pending,
            Err(reason) => {
                tracing::debug!(
                    code = FLOW_REJECTED,
                    flow = "analyze",
                    reason = reason.code(),
                    "trigger refused"
                );
                return FlowOutcome::Rejected(reason);
            }
        };
        publish(&self.updates, pending.state());
        let _release = PublishedRelease::new(&self.updates);

        tracing::info!(session_id = %self.session_id, "requesting spending analysis");
        let result = self.transport.analyze(&self.session_id).await;
        let outcome = pending.resolve(result);

        publish(&self.updates, &self.state);
        outcome
    }

    pub async fn submit_chat(&mut self) -> FlowOutcome {
        let pending = match self.chat.begin(&mut self.state) {
            Ok(pending) => pending,
            Err(reason) => {
                tracing::debug!(
                    code = FLOW_REJECTED,
                    flow = "chat",
                    reason = reason.code(),
                    "trigger refused"
                );
                return FlowOutcome::Rejected(reason);
            }
        };
        publish(&self.updates, pending.state());
        let _release = PublishedRelease::new(&self.updates);

        tracing::info!(
            session_id = %self.session_id,
            message_len = pending.text().len(),
            "sending chat message"
        );
        let result = self.transport.chat(&self.session_id, pending.text()).await;
        let outcome = pending.resolve(result);

        publish(&self.updates, &self.state);
        outcome
    }
}

fn publish(updates: &watch::Sender<SessionState>, state: &SessionState) {
    updates.send_replace(state.clone());
}

/// Clears `busy` in the last published snapshot when a request ends.
///
/// A resolved request has already published an idle snapshot, so this only
/// notifies subscribers when the request future was dropped mid-flight. The
/// snapshot published at trigger time is otherwise exact: state only changes
/// again on resolution.
struct PublishedRelease<'a> {
    updates: &'a watch::Sender<SessionState>,
}

impl<'a> PublishedRelease<'a> {
    fn new(updates: &'a watch::Sender<SessionState>) -> Self {
        Self { updates }
    }
}

impl Drop for PublishedRelease<'_> {
    fn drop(&mut self) {
        self.updates.send_if_modified(|snapshot| {
            let was_busy = snapshot.is_busy();
            snapshot.set_busy(false);
            was_busy
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{future::Future, sync::Arc, task::Poll};

    use tokio::sync::Notify;

    use super::*;
    use crate::{
        domain::{analysis::CategoryAmount, message::Role},
        test_support::{StubTransport, TransportCall},
        usecases::{
            analyze::{ANALYZE_FAILED_REPLY, ANALYZE_REQUEST_TEXT},
            chat::CHAT_FAILED_REPLY,
            contracts::{AssistantSourceError, ChatReply},
            outcome::RejectReason,
        },
    };

    fn settings(policy: AnalyzePolicy) -> SessionSettings {
        SessionSettings {
            session_id: "session-1".to_owned(),
            currency: "KZT".to_owned(),
            analyze_policy: policy,
        }
    }

    fn analysis(summary: &str, categories: &[(&str, f64)]) -> AnalysisResult {
        AnalysisResult::new(
            summary,
            categories
                .iter()
                .map(|(name, amount)| CategoryAmount::new(*name, *amount))
                .collect(),
        )
    }

    #[tokio::test]
    async fn chat_submissions_add_two_messages_each() {
        let transport = StubTransport::default()
            .with_chat(Ok(ChatReply::new("first reply")))
            .with_chat(Err(AssistantSourceError::Transport("offline".into())))
            .with_chat(Ok(ChatReply::new("third reply")));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        for (index, text) in ["one", " two ", "three"].into_iter().enumerate() {
            controller.set_draft(text);
            let outcome = controller.submit_chat().await;

            assert!(!outcome.is_rejected());
            assert_eq!(controller.messages().len(), (index + 1) * 2);
            assert!(!controller.is_busy());
        }

        assert_eq!(controller.messages()[1].content, "first reply");
        assert_eq!(controller.messages()[3].content, CHAT_FAILED_REPLY);
        assert_eq!(controller.messages()[2].content, "two");
        assert_eq!(controller.messages()[5].content, "third reply");
    }

    #[tokio::test]
    async fn chat_sends_session_id_and_trimmed_text() {
        let transport = StubTransport::default().with_chat(Ok(ChatReply::new("ok")));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        controller.set_draft("  budget tips?\n");
        controller.submit_chat().await;

        assert_eq!(
            transport.calls(),
            vec![TransportCall::Chat {
                session_id: "session-1".to_owned(),
                message: "budget tips?".to_owned(),
            }]
        );
        assert_eq!(controller.draft(), "");
    }

    #[tokio::test]
    async fn chat_reply_is_appended_verbatim() {
        let transport = StubTransport::default().with_chat(Ok(ChatReply::new("hello")));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        controller.set_draft("hi");
        let outcome = controller.submit_chat().await;

        assert_eq!(outcome, FlowOutcome::Completed);
        let reply = controller.messages().last().expect("reply should exist");
        assert_eq!(reply.role, Role::Assistant);
        assert_eq!(reply.content, "hello");
    }

    #[tokio::test]
    async fn whitespace_draft_changes_nothing() {
        let transport = StubTransport::default();
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));
        controller.set_draft("   ");
        let before = controller.state().clone();

        let outcome = controller.submit_chat().await;

        assert_eq!(outcome, FlowOutcome::Rejected(RejectReason::EmptyDraft));
        assert_eq!(controller.state(), &before);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn analyze_appends_two_messages_and_stores_result() {
        let transport =
            StubTransport::default().with_analyze(Ok(analysis("ok", &[("A", 100.0)])));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        let outcome = controller.submit_analyze().await;

        assert_eq!(outcome, FlowOutcome::Completed);
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(controller.messages()[0].content, ANALYZE_REQUEST_TEXT);
        let reply = &controller.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("A: 100"));
        assert!(reply.content.contains("KZT"));
        assert!(controller.analysis().is_some());
        assert_eq!(
            transport.calls(),
            vec![TransportCall::Analyze {
                session_id: "session-1".to_owned()
            }]
        );
    }

    #[tokio::test]
    async fn second_analyze_is_refused_under_one_shot_policy() {
        let transport = StubTransport::default()
            .with_analyze(Ok(analysis("ok", &[("A", 100.0)])))
            .with_analyze(Ok(analysis("again", &[("B", 1.0)])));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        controller.submit_analyze().await;
        let outcome = controller.submit_analyze().await;

        assert_eq!(outcome, FlowOutcome::Rejected(RejectReason::AlreadyAnalyzed));
        assert_eq!(controller.messages().len(), 2);
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(controller.analysis().map(|a| a.summary.as_str()), Some("ok"));
    }

    #[tokio::test]
    async fn failed_analyze_can_be_retried() {
        let transport = StubTransport::default()
            .with_analyze(Err(AssistantSourceError::Transport("dns failure".into())))
            .with_analyze(Ok(analysis("ok", &[("food", 500.0), ("transport", 500.0)])));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));

        let first = controller.submit_analyze().await;
        assert!(matches!(first, FlowOutcome::Failed(_)));
        assert!(controller.analysis().is_none());
        assert!(!controller.is_busy());
        assert_eq!(controller.messages()[1].content, ANALYZE_FAILED_REPLY);

        let second = controller.submit_analyze().await;
        assert_eq!(second, FlowOutcome::Completed);
        assert_eq!(controller.messages().len(), 4);

        let shares = controller
            .category_breakdown()
            .expect("breakdown should be derived");
        assert_eq!(shares[0].display_percentage(), 50.0);
        assert_eq!(shares[1].display_percentage(), 50.0);
    }

    #[tokio::test]
    async fn busy_is_observable_for_the_whole_request_interval() {
        let gate = Arc::new(Notify::new());
        let transport = StubTransport::default()
            .with_chat(Ok(ChatReply::new("done")))
            .gated(Arc::clone(&gate));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));
        let mut updates = controller.subscribe();
        controller.set_draft("hello");
        let _ = updates.borrow_and_update();

        let observer = async {
            updates.changed().await.expect("controller should publish");
            let snapshot = updates.borrow_and_update().clone();
            gate.notify_one();
            snapshot
        };

        let (outcome, in_flight) = tokio::join!(controller.submit_chat(), observer);

        assert_eq!(outcome, FlowOutcome::Completed);
        assert!(in_flight.is_busy());
        assert_eq!(in_flight.draft(), "");
        assert_eq!(in_flight.messages().len(), 1);

        assert!(!controller.is_busy());
        assert!(!updates.borrow().is_busy());
        assert_eq!(updates.borrow().messages().len(), 2);
    }

    #[tokio::test]
    async fn dropping_an_in_flight_request_releases_busy() {
        let gate = Arc::new(Notify::new());
        let transport = StubTransport::default()
            .with_analyze(Ok(analysis("late", &[("A", 1.0)])))
            .gated(gate);
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));
        let mut updates = controller.subscribe();

        {
            let mut request = Box::pin(controller.submit_analyze());
            let first_poll =
                std::future::poll_fn(|cx| Poll::Ready(request.as_mut().poll(cx))).await;
            assert!(first_poll.is_pending());
            assert!(updates.borrow_and_update().is_busy());
        }

        assert!(!controller.is_busy());
        assert!(controller.analysis().is_none());
        assert_eq!(controller.messages().len(), 1);

        assert!(updates.has_changed().expect("controller is still alive"));
        let observed = updates.borrow_and_update().clone();
        assert!(!observed.is_busy());
        assert_eq!(&observed, controller.state());
    }

    #[tokio::test]
    async fn resolved_request_publishes_idle_state_once() {
        let transport = StubTransport::default().with_chat(Ok(ChatReply::new("done")));
        let mut controller = SessionController::new(&transport, settings(AnalyzePolicy::OneShot));
        controller.set_draft("hello");
        let mut updates = controller.subscribe();
        let _ = updates.borrow_and_update();

        controller.submit_chat().await;

        assert!(updates.has_changed().expect("controller is still alive"));
        assert_eq!(&*updates.borrow_and_update(), controller.state());
        assert!(!updates.has_changed().expect("controller is still alive"));
    }
}
