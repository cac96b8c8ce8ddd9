//! Inputs to the session reducer

use crate::gateway::CompletionResult;

/// Everything that can happen to a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user submitted an utterance
    Submit(String),
    /// The gateway resolved the request started at `generation`
    CompletionArrived {
        /// Generation captured when the request was started
        generation: u64,
        /// Gateway outcome
        result: CompletionResult,
    },
    /// Discard history and start over
    Reset,
    /// The gateway was (re)built; `None` means it is ready
    Configure {
        /// Reason submissions must be refused
        configuration_error: Option<String>,
    },
}
