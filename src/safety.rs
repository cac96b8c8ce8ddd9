//! Lexical crisis detection
//!
//! A blunt, auditable safety floor: an utterance is a crisis when any
//! phrase from a fixed list appears anywhere in it, ignoring case. There
//! is no word-boundary check, so a phrase embedded in a longer word still
//! matches. Over-triggering the referral is acceptable; missing a listed
//! phrase is not.

use serde::Serialize;
use std::fmt;

/// Phrases that classify an utterance as a crisis
///
/// Entries are lowercase with single spaces.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "killing myself",
    "end my life",
    "ending my life",
    "take my own life",
    "want to die",
    "wanna die",
    "better off dead",
    "no reason to live",
    "don't want to live",
    "dont want to live",
    "don't want to be alive",
    "can't go on",
    "cant go on",
    "self harm",
    "self-harm",
    "hurt myself",
    "hurting myself",
    "cut myself",
    "cutting myself",
    "overdose",
    "hopeless",
    "no way out",
    "end it all",
];

/// Classification of a single user utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisVerdict {
    /// At least one crisis phrase matched
    Crisis,
    /// No crisis phrase matched
    Normal,
}

impl CrisisVerdict {
    /// Returns true for `Crisis`
    pub fn is_crisis(&self) -> bool {
        matches!(self, Self::Crisis)
    }
}

impl fmt::Display for CrisisVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crisis => write!(f, "crisis"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Classify an utterance
///
/// Depends only on `utterance`. Case is ignored and runs of whitespace
/// are collapsed before matching, so "End  My\nLife" matches
/// "end my life". Typographic apostrophes are folded to `'`.
///
/// # Examples
///
/// ```
/// use solace::safety::{classify, CrisisVerdict};
///
/// assert_eq!(classify("I want to END MY LIFE"), CrisisVerdict::Crisis);
/// assert_eq!(classify("I had a rough day at work"), CrisisVerdict::Normal);
/// ```
pub fn classify(utterance: &str) -> CrisisVerdict {
    match matched_phrase(utterance) {
        Some(_) => CrisisVerdict::Crisis,
        None => CrisisVerdict::Normal,
    }
}

/// First listed phrase found in `utterance`, if any
pub fn matched_phrase(utterance: &str) -> Option<&'static str> {
    let normalized = normalize(utterance);
    CRISIS_PHRASES
        .iter()
        .copied()
        .find(|phrase| normalized.contains(phrase))
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{2019}', "'")
        .to_lowercase()
}
