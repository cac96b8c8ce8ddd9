//! Fixed texts used by the session
//!
//! Everything the session itself authors lives here: the system prompt
//! that bounds the remote model, the greeting that seeds every session,
//! the crisis referral, and the per-failure guidance messages.

/// System prompt prepended to every context window
pub const SYSTEM_PROMPT: &str = "\
You are a supportive, empathetic listening companion. You are not a \
therapist, doctor, or crisis counselor and must never claim to be one. \
Do not diagnose conditions, recommend medication, or give medical, legal, \
or financial advice. Keep replies warm, brief, and focused on the user's \
feelings. If the user mentions self-harm, suicide, or being in danger, \
stop the conversation topic and encourage them to contact emergency \
services or a crisis line immediately.";

/// Assistant greeting that seeds every new or reset session
pub const DISCLAIMER: &str = "\
Hi, I'm here to listen. I'm an AI companion, not a mental health \
professional, and I can't provide medical advice or emergency help. \
If you are in crisis or thinking about harming yourself, please call \
your local emergency number or a crisis line such as 988 (US) right away. \
What's on your mind today?";

/// Assistant reply used for every crisis-classified utterance
pub const CRISIS_REFERRAL: &str = "\
It sounds like you are going through something really painful, and your \
safety matters. I'm not able to help with this, but people are ready to \
support you right now. Please call or text 988 (Suicide & Crisis Lifeline, \
US), contact your local emergency number, or reach out to someone you \
trust. If you are outside the US, you can find a local helpline at \
https://findahelpline.com. You don't have to go through this alone.";

/// Assistant reply used when the remote service returned nothing usable
pub const EMPTY_COMPLETION_FALLBACK: &str = "\
I'm sorry, I couldn't come up with a response just now. Could you try \
saying that again?";

/// Guidance shown when the remote service is rate limiting requests
pub const RATE_LIMITED_GUIDANCE: &str = "\
I'm receiving a lot of messages right now. Please wait a moment and try \
again shortly.";

/// Guidance shown when the remote service rejected the credential
pub const UNAUTHORIZED_GUIDANCE: &str = "\
I couldn't connect because the service rejected this app's credentials. \
Please refresh or check the API key configuration, then try again.";

/// Guidance shown when the remote service reported an internal failure
pub const SERVICE_UNAVAILABLE_GUIDANCE: &str = "\
The service I rely on is having trouble at the moment. Please try again \
later.";

/// Guidance shown for any other failure
pub const UNKNOWN_FAILURE_GUIDANCE: &str = "\
Something went wrong while I was thinking about your message. Please try \
again.";
