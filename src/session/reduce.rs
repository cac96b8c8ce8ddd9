//! Pure transition function for the session
//!
//! `reduce` is the only code that mutates `SessionState`. It performs no
//! I/O; remote calls are requested through `Effect::RequestCompletion`
//! and their results come back as `SessionEvent::CompletionArrived`.

use super::effect::{Effect, Rejection};
use super::event::SessionEvent;
use super::state::{RequestState, SessionState};
use crate::context::build_context;
use crate::gateway::CompletionResult;
use crate::providers::Message;
use crate::safety::{self, CrisisVerdict};

/// Apply `event` to `state`
///
/// # Examples
///
/// ```
/// use solace::session::{reduce, Effect, SessionEvent, SessionState};
///
/// let mut state = SessionState::default();
/// let effect = reduce(&mut state, SessionEvent::Submit("I want to end my life".into()));
/// assert_eq!(effect, Effect::Referred);
/// assert_eq!(state.messages().len(), 3);
/// assert!(!state.is_pending());
/// ```
pub fn reduce(state: &mut SessionState, event: SessionEvent) -> Effect {
    match event {
        SessionEvent::Submit(utterance) => submit(state, utterance),
        SessionEvent::CompletionArrived { generation, result } => {
            complete(state, generation, result)
        }
        SessionEvent::Reset => {
            reset(state);
            Effect::None
        }
        SessionEvent::Configure {
            configuration_error,
        } => {
            state.configuration_error = configuration_error;
            Effect::None
        }
    }
}

fn submit(state: &mut SessionState, utterance: String) -> Effect {
    let utterance = utterance.trim();
    if utterance.is_empty() {
        return Effect::Rejected(Rejection::Blank);
    }
    if state.request == RequestState::Pending {
        tracing::warn!("Submission rejected: request already pending");
        return Effect::Rejected(Rejection::Busy);
    }
    if state.configuration_error.is_some() {
        tracing::warn!("Submission rejected: gateway not configured");
        return Effect::Rejected(Rejection::NotConfigured);
    }

    state.messages.push(Message::user(utterance));
    state.request = RequestState::Pending;

    match safety::classify(utterance) {
        CrisisVerdict::Crisis => {
            tracing::warn!(
                utterance_len = utterance.len(),
                "Crisis phrase detected, issuing referral"
            );
            state
                .messages
                .push(Message::assistant(state.policy.referral.clone()));
            state.request = RequestState::Idle;
            state.last_error = None;
            Effect::Referred
        }
        CrisisVerdict::Normal => {
            let context = build_context(
                &state.messages,
                &state.policy.system_prompt,
                state.policy.context_window,
            );
            tracing::debug!(
                generation = state.generation,
                context_len = context.len(),
                "Requesting completion"
            );
            Effect::RequestCompletion {
                generation: state.generation,
                context,
            }
        }
    }
}

fn complete(state: &mut SessionState, generation: u64, result: CompletionResult) -> Effect {
    if generation != state.generation || state.request != RequestState::Pending {
        tracing::warn!(
            result_generation = generation,
            current_generation = state.generation,
            "Discarding stale completion"
        );
        return Effect::Discarded;
    }

    let kind = result.error_kind();
    state.messages.push(result.into_message());
    state.request = RequestState::Idle;
    state.last_error = kind;
    Effect::Appended(kind)
}

fn reset(state: &mut SessionState) {
    state.generation = state.generation.wrapping_add(1);
    state.messages = vec![Message::assistant(state.policy.disclaimer.clone())];
    state.request = RequestState::Idle;
    state.last_error = None;
    tracing::info!(generation = state.generation, "Session reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ErrorKind;
    use crate::prompts;
    use crate::providers::Role;
    use crate::session::SessionPolicy;

    fn pending_state(text: &str) -> (SessionState, u64) {
        let mut state = SessionState::default();
        match reduce(&mut state, SessionEvent::Submit(text.to_string())) {
            Effect::RequestCompletion { generation, .. } => (state, generation),
            other => panic!("expected completion request, got {:?}", other),
        }
    }

    #[test]
    fn test_normal_submit_requests_completion() {
        let mut state = SessionState::default();
        let effect = reduce(&mut state, SessionEvent::Submit("I had a rough day".into()));

        let Effect::RequestCompletion {
            generation,
            context,
        } = effect
        else {
            panic!("expected completion request");
        };
        assert_eq!(generation, 0);
        assert_eq!(context[0].role(), Role::System);
        assert_eq!(context.last().unwrap(), &Message::user("I had a rough day"));
        assert!(state.is_pending());
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_crisis_submit_appends_referral() {
        let mut state = SessionState::default();
        let effect = reduce(
            &mut state,
            SessionEvent::Submit("I want to end my life".into()),
        );
        assert_eq!(effect, Effect::Referred);
        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[1], Message::user("I want to end my life"));
        assert_eq!(
            state.messages()[2],
            Message::assistant(prompts::CRISIS_REFERRAL)
        );
        assert!(!state.is_pending());
    }

    #[test]
    fn test_blank_submit_rejected() {
        let mut state = SessionState::default();
        for text in ["", "   ", "\n\t"] {
            let effect = reduce(&mut state, SessionEvent::Submit(text.into()));
            assert_eq!(effect, Effect::Rejected(Rejection::Blank));
        }
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_submit_is_trimmed() {
        let (state, _) = pending_state("  hello there \n");
        assert_eq!(state.messages()[1].content(), "hello there");
    }

    #[test]
    fn test_submit_while_pending_is_noop() {
        let (mut state, _) = pending_state("first");
        let len = state.messages().len();
        let effect = reduce(&mut state, SessionEvent::Submit("second".into()));
        assert_eq!(effect, Effect::Rejected(Rejection::Busy));
        assert_eq!(state.messages().len(), len);
        assert!(state.is_pending());
    }

    #[test]
    fn test_crisis_submit_while_pending_is_noop() {
        let (mut state, _) = pending_state("first");
        let effect = reduce(&mut state, SessionEvent::Submit("kill myself".into()));
        assert_eq!(effect, Effect::Rejected(Rejection::Busy));
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_unconfigured_submit_rejected() {
        let mut state = SessionState::default();
        reduce(
            &mut state,
            SessionEvent::Configure {
                configuration_error: Some("missing key".into()),
            },
        );
        let effect = reduce(&mut state, SessionEvent::Submit("hello".into()));
        assert_eq!(effect, Effect::Rejected(Rejection::NotConfigured));
        assert_eq!(state.messages().len(), 1);
        assert!(!state.is_pending());
        assert_eq!(state.configuration_error(), Some("missing key"));
    }

    #[test]
    fn test_reconfigure_enables_submission() {
        let mut state = SessionState::default();
        reduce(
            &mut state,
            SessionEvent::Configure {
                configuration_error: Some("missing key".into()),
            },
        );
        reduce(
            &mut state,
            SessionEvent::Configure {
                configuration_error: None,
            },
        );
        let effect = reduce(&mut state, SessionEvent::Submit("hello".into()));
        assert!(matches!(effect, Effect::RequestCompletion { .. }));
    }

    #[test]
    fn test_success_appends_content() {
        let (mut state, generation) = pending_state("I had a rough day at work");
        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Success("That sounds tough, tell me more.".into()),
            },
        );
        assert_eq!(effect, Effect::Appended(None));
        assert_eq!(state.messages().len(), 3);
        assert_eq!(
            state.messages()[2],
            Message::assistant("That sounds tough, tell me more.")
        );
        assert!(!state.is_pending());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_failure_appends_guidance_and_sets_flag() {
        let (mut state, generation) = pending_state("hello");
        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Failure(ErrorKind::RateLimited),
            },
        );
        assert_eq!(effect, Effect::Appended(Some(ErrorKind::RateLimited)));
        assert_eq!(
            state.messages()[2].content(),
            prompts::RATE_LIMITED_GUIDANCE
        );
        assert_eq!(state.last_error(), Some(ErrorKind::RateLimited));
        assert!(!state.is_pending());
    }

    #[test]
    fn test_error_flag_cleared_by_next_success() {
        let (mut state, generation) = pending_state("hello");
        reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Failure(ErrorKind::Unknown),
            },
        );
        let Effect::RequestCompletion { generation, .. } =
            reduce(&mut state, SessionEvent::Submit("again".into()))
        else {
            panic!("expected completion request");
        };
        assert_eq!(state.last_error(), Some(ErrorKind::Unknown));

        reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Success("ok".into()),
            },
        );
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_reset_reseeds_and_bumps_generation() {
        let (mut state, _) = pending_state("hello");
        assert_eq!(reduce(&mut state, SessionEvent::Reset), Effect::None);
        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content(), prompts::DISCLAIMER);
        assert!(!state.is_pending());
        assert_eq!(state.generation(), 1);
    }

    #[test]
    fn test_reset_clears_error_flag() {
        let (mut state, generation) = pending_state("hello");
        reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Failure(ErrorKind::ServiceUnavailable),
            },
        );
        reduce(&mut state, SessionEvent::Reset);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_reset_twice_equals_once() {
        let (mut once, _) = pending_state("hello");
        let mut twice = once.clone();
        reduce(&mut once, SessionEvent::Reset);
        reduce(&mut twice, SessionEvent::Reset);
        reduce(&mut twice, SessionEvent::Reset);
        assert_eq!(once.snapshot().messages, twice.snapshot().messages);
        assert_eq!(once.is_pending(), twice.is_pending());
        assert_eq!(once.last_error(), twice.last_error());
    }

    #[test]
    fn test_reset_keeps_configuration_error() {
        let mut state = SessionState::default();
        reduce(
            &mut state,
            SessionEvent::Configure {
                configuration_error: Some("missing key".into()),
            },
        );
        reduce(&mut state, SessionEvent::Reset);
        assert_eq!(state.configuration_error(), Some("missing key"));
    }

    #[test]
    fn test_stale_completion_after_reset_is_discarded() {
        let (mut state, stale) = pending_state("hello");
        reduce(&mut state, SessionEvent::Reset);

        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation: stale,
                result: CompletionResult::Success("late reply".into()),
            },
        );
        assert_eq!(effect, Effect::Discarded);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_stale_completion_does_not_resolve_new_request() {
        let (mut state, stale) = pending_state("hello");
        reduce(&mut state, SessionEvent::Reset);
        let Effect::RequestCompletion { generation, .. } =
            reduce(&mut state, SessionEvent::Submit("new topic".into()))
        else {
            panic!("expected completion request");
        };

        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation: stale,
                result: CompletionResult::Success("late reply".into()),
            },
        );
        assert_eq!(effect, Effect::Discarded);
        assert!(state.is_pending());
        assert_eq!(state.messages().len(), 2);

        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation,
                result: CompletionResult::Success("fresh reply".into()),
            },
        );
        assert_eq!(effect, Effect::Appended(None));
        assert_eq!(state.messages()[2].content(), "fresh reply");
    }

    #[test]
    fn test_completion_while_idle_is_discarded() {
        let mut state = SessionState::default();
        let effect = reduce(
            &mut state,
            SessionEvent::CompletionArrived {
                generation: 0,
                result: CompletionResult::Success("unsolicited".into()),
            },
        );
        assert_eq!(effect, Effect::Discarded);
        assert_eq!(state.messages().len(), 1);
    }

    #[test]
    fn test_context_respects_policy_window() {
        let mut state = SessionState::new(SessionPolicy::with_context_window(2));
        let Effect::RequestCompletion { context, .. } =
            reduce(&mut state, SessionEvent::Submit("hello".into()))
        else {
            panic!("expected completion request");
        };
        assert_eq!(context.len(), 3);
        assert_eq!(context[1].content(), prompts::DISCLAIMER);
        assert_eq!(context[2].content(), "hello");
    }

    #[test]
    fn test_each_exchange_adds_exactly_two_messages() {
        let mut state = SessionState::default();
        for i in 0..12 {
            let before = state.messages().len();
            let text = if i % 3 == 0 {
                "I feel hopeless".to_string()
            } else {
                format!("message {}", i)
            };
            match reduce(&mut state, SessionEvent::Submit(text)) {
                Effect::Referred => {}
                Effect::RequestCompletion { generation, .. } => {
                    reduce(
                        &mut state,
                        SessionEvent::CompletionArrived {
                            generation,
                            result: CompletionResult::Success(format!("reply {}", i)),
                        },
                    );
                }
                other => panic!("unexpected effect {:?}", other),
            }
            assert_eq!(state.messages().len(), before + 2);
            assert_eq!(state.messages()[before].role(), Role::User);
            assert_eq!(state.messages()[before + 1].role(), Role::Assistant);
        }
    }
}
