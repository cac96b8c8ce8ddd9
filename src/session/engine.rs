//! Async driver for the session reducer
//!
//! `ChatSession` owns the state behind a lock, runs `reduce` for every
//! event, and performs the one suspend point: the gateway call. The lock
//! is never held across that call, so `reset` and snapshots stay
//! responsive while a request is in flight. Results that arrive after a
//! reset carry an old generation and are dropped by the reducer.

use super::effect::{Effect, Rejection};
use super::event::SessionEvent;
use super::input::KeyPress;
use super::reduce::reduce;
use super::state::{SessionPolicy, SessionSnapshot, SessionState};
use crate::config::Config;
use crate::gateway::{CompletionGateway, ErrorKind};
use crate::providers::Message;
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::Instrument;
use uuid::Uuid;

/// What a call to `submit` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Nothing was appended
    Rejected(Rejection),
    /// Crisis referral appended without a remote call
    Referred,
    /// Remote completion appended
    Answered,
    /// Failure guidance appended
    Failed(ErrorKind),
    /// The session was reset while the request was in flight; the result
    /// was dropped
    Discarded,
}

struct Inner {
    id: Uuid,
    state: RwLock<SessionState>,
    gateway: RwLock<Arc<CompletionGateway>>,
}

/// Handle to a single conversation
///
/// Cloning the handle shares the conversation, which is how the input
/// loop and a reset control can act on the same session concurrently.
///
/// # Examples
///
/// ```
/// use solace::gateway::CompletionGateway;
/// use solace::session::{ChatSession, SessionPolicy, SubmitOutcome};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let session = ChatSession::new(CompletionGateway::disabled("no key"), SessionPolicy::default());
/// assert!(session.configuration_error().is_some());
///
/// let outcome = session.submit("hello").await;
/// assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
/// assert_eq!(session.messages().len(), 1);
/// # }
/// ```
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<Inner>,
}

impl ChatSession {
    /// Create a session around a gateway
    pub fn new(gateway: CompletionGateway, policy: SessionPolicy) -> Self {
        let mut state = SessionState::new(policy);
        reduce(
            &mut state,
            SessionEvent::Configure {
                configuration_error: gateway.configuration_error().map(str::to_string),
            },
        );

        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, ready = gateway.is_ready(), "Session created");

        Self {
            inner: Arc::new(Inner {
                id,
                state: RwLock::new(state),
                gateway: RwLock::new(Arc::new(gateway)),
            }),
        }
    }

    /// Create a session from configuration
    ///
    /// The gateway is built once here; a missing credential leaves the
    /// session permanently unable to submit until `reconfigure`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CompletionGateway::from_config(config),
            SessionPolicy::with_context_window(config.session.context_window),
        )
    }

    /// Session identifier used in logs
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Submit one utterance and wait for it to resolve
    ///
    /// Blank input, a pending request, or a disabled gateway make this a
    /// no-op. Crisis utterances resolve immediately with the referral.
    pub async fn submit(&self, utterance: &str) -> SubmitOutcome {
        let span = tracing::info_span!("submit", session_id = %self.inner.id);
        self.submit_inner(utterance.to_string())
            .instrument(span)
            .await
    }

    async fn submit_inner(&self, utterance: String) -> SubmitOutcome {
        let (generation, context) = match self.dispatch(SessionEvent::Submit(utterance)) {
            Effect::Rejected(reason) => return SubmitOutcome::Rejected(reason),
            Effect::Referred => return SubmitOutcome::Referred,
            Effect::RequestCompletion {
                generation,
                context,
            } => (generation, context),
            other => {
                tracing::error!("Unexpected effect for submission: {:?}", other);
                return SubmitOutcome::Discarded;
            }
        };

        let gateway = self.gateway();
        let result = gateway.complete(&context).await;

        match self.dispatch(SessionEvent::CompletionArrived { generation, result }) {
            Effect::Appended(None) => SubmitOutcome::Answered,
            Effect::Appended(Some(kind)) => SubmitOutcome::Failed(kind),
            _ => SubmitOutcome::Discarded,
        }
    }

    /// Feed a key press from the input box
    ///
    /// Returns `None` when the key does not submit.
    pub async fn handle_key(&self, key: KeyPress, draft: &str) -> Option<SubmitOutcome> {
        if !key.submits() {
            return None;
        }
        Some(self.submit(draft).await)
    }

    /// Discard history and reseed the disclaimer
    ///
    /// Allowed at any time, including while a request is in flight.
    pub fn reset(&self) {
        self.dispatch(SessionEvent::Reset);
    }

    /// Replace the gateway, e.g. after the user supplies a credential
    pub fn reconfigure(&self, gateway: CompletionGateway) {
        let configuration_error = gateway.configuration_error().map(str::to_string);
        *self
            .inner
            .gateway
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(gateway);
        self.dispatch(SessionEvent::Configure {
            configuration_error,
        });
        tracing::info!(session_id = %self.inner.id, "Session reconfigured");
    }

    /// Read-only copy of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read(|state| state.snapshot())
    }

    /// History, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.read(|state| state.messages().to_vec())
    }

    /// True while a submission is being resolved
    pub fn is_pending(&self) -> bool {
        self.read(SessionState::is_pending)
    }

    /// Failure of the most recent exchange, if it failed
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.read(SessionState::last_error)
    }

    /// Why submissions are disabled, if they are
    pub fn configuration_error(&self) -> Option<String> {
        self.read(|state| state.configuration_error().map(str::to_string))
    }

    fn gateway(&self) -> Arc<CompletionGateway> {
        Arc::clone(
            &self
                .inner
                .gateway
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    fn dispatch(&self, event: SessionEvent) -> Effect {
        let mut state = self
            .inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        reduce(&mut state, event)
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.inner.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}
