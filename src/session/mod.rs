//! Conversation session
//!
//! The session is a reducer over explicit state:
//!
//! - `state`: history, request state, reset generation and banners
//! - `event`: what can happen (submit, completion arrived, reset, configure)
//! - `effect`: what the driver must do next
//! - `reduce`: the only function that mutates state
//! - `engine`: `ChatSession`, the async driver that calls the gateway
//! - `input`: key-press handling for the input box
//!
//! Every transition is synchronous and testable without a runtime. The
//! driver performs the single suspend point and feeds the result back in.

pub mod effect;
pub mod engine;
pub mod event;
pub mod input;
pub mod reduce;
pub mod state;

pub use effect::{Effect, Rejection};
pub use engine::{ChatSession, SubmitOutcome};
pub use event::SessionEvent;
pub use input::{Key, KeyPress};
pub use reduce::reduce;
pub use state::{RequestState, SessionPolicy, SessionSnapshot, SessionState};
