//! Session state owned by the reducer

use crate::context::DEFAULT_CONTEXT_WINDOW;
use crate::gateway::ErrorKind;
use crate::prompts;
use crate::providers::Message;
use serde::Serialize;

/// Whether a completion request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    /// Ready for a new submission
    Idle,
    /// A submission is being resolved; further submissions are refused
    Pending,
}

/// Fixed texts and limits a session runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    /// History messages included per context window
    pub context_window: usize,
    /// Leading system message of every context window
    pub system_prompt: String,
    /// Assistant greeting seeded at creation and after reset
    pub disclaimer: String,
    /// Assistant reply for crisis-classified utterances
    pub referral: String,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            system_prompt: prompts::SYSTEM_PROMPT.to_string(),
            disclaimer: prompts::DISCLAIMER.to_string(),
            referral: prompts::CRISIS_REFERRAL.to_string(),
        }
    }
}

impl SessionPolicy {
    /// Default texts with a custom context window
    pub fn with_context_window(context_window: usize) -> Self {
        Self {
            context_window,
            ..Self::default()
        }
    }
}

/// Complete state of one conversation
///
/// History is never empty: it starts with the disclaimer and is reseeded
/// with it on reset. Only `reduce` mutates it.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(super) policy: SessionPolicy,
    pub(super) messages: Vec<Message>,
    pub(super) request: RequestState,
    pub(super) generation: u64,
    pub(super) last_error: Option<ErrorKind>,
    pub(super) configuration_error: Option<String>,
}

impl SessionState {
    /// Fresh session seeded with the disclaimer
    pub fn new(policy: SessionPolicy) -> Self {
        let messages = vec![Message::assistant(policy.disclaimer.clone())];
        Self {
            policy,
            messages,
            request: RequestState::Idle,
            generation: 0,
            last_error: None,
            configuration_error: None,
        }
    }

    /// History, oldest first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Current request state
    pub fn request(&self) -> RequestState {
        self.request
    }

    /// True while a submission is being resolved
    pub fn is_pending(&self) -> bool {
        self.request == RequestState::Pending
    }

    /// Reset counter; results tagged with an older value are stale
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Failure of the most recent exchange, if it failed
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Why submissions are disabled, if they are
    pub fn configuration_error(&self) -> Option<&str> {
        self.configuration_error.as_deref()
    }

    /// Policy in effect
    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Immutable copy for presentation
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            messages: self.messages.clone(),
            is_pending: self.is_pending(),
            last_error: self.last_error,
            configuration_error: self.configuration_error.clone(),
            generation: self.generation,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SessionPolicy::default())
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// History, oldest first
    pub messages: Vec<Message>,
    /// True while a submission is being resolved
    pub is_pending: bool,
    /// Transient failure banner
    pub last_error: Option<ErrorKind>,
    /// Persistent configuration problem
    pub configuration_error: Option<String>,
    /// Reset counter
    pub generation: u64,
}

impl SessionSnapshot {
    /// Banner text for the transient failure, if any
    pub fn last_error_message(&self) -> Option<String> {
        self.last_error.map(|kind| kind.to_string())
    }
}
