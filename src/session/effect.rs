//! Outputs of the session reducer

use crate::gateway::ErrorKind;
use crate::providers::Message;
use serde::Serialize;
use std::fmt;

/// Why a submission was refused without touching history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Utterance was empty or whitespace
    Blank,
    /// Another submission is still pending
    Busy,
    /// The gateway has no usable configuration
    NotConfigured,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => write!(f, "message is empty"),
            Self::Busy => write!(f, "still waiting for the previous reply"),
            Self::NotConfigured => write!(f, "chat is not configured"),
        }
    }
}

/// What the driver must do, or what just happened, after a reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// State changed (or not) with nothing further to do
    None,
    /// Submission refused; history unchanged
    Rejected(Rejection),
    /// Crisis referral appended; the remote service is not consulted
    Referred,
    /// Call the gateway with `context`, then feed the result back as
    /// `CompletionArrived { generation, .. }`
    RequestCompletion {
        /// Generation to tag the result with
        generation: u64,
        /// Context window to send
        context: Vec<Message>,
    },
    /// Completion appended; carries the failure kind when it failed
    Appended(Option<ErrorKind>),
    /// Completion belonged to an earlier generation and was dropped
    Discarded,
}
