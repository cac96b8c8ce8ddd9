//! Context window construction
//!
//! The payload sent upstream is the system prompt followed by the most
//! recent `window` messages of history, in their original order. The
//! system prompt is always first, so truncation never drops the policy.

use crate::providers::Message;

/// Default number of history messages included in a context window
pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// Build the bounded message sequence for one completion request
///
/// # Arguments
///
/// * `history` - Full session history, oldest first
/// * `system_prompt` - Policy text placed in the leading system message
/// * `window` - Maximum number of history messages to include
///
/// # Examples
///
/// ```
/// use solace::context::build_context;
/// use solace::providers::{Message, Role};
///
/// let history: Vec<Message> = (0..15).map(|i| Message::user(i.to_string())).collect();
/// let context = build_context(&history, "be kind", 10);
/// assert_eq!(context.len(), 11);
/// assert_eq!(context[0].role(), Role::System);
/// assert_eq!(context[1].content(), "5");
/// ```
pub fn build_context(history: &[Message], system_prompt: &str, window: usize) -> Vec<Message> {
    let start = history.len().saturating_sub(window);
    let recent = &history[start..];

    let mut context = Vec::with_capacity(recent.len() + 1);
    context.push(Message::system(system_prompt));
    context.extend(recent.iter().cloned());

    tracing::debug!(
        history_len = history.len(),
        included = recent.len(),
        "Built context window"
    );

    context
}
