//! Key-press handling for the input box
//!
//! Enter without a modifier submits the draft; Shift+Enter (or any other
//! modified Enter) is left to the editor as a newline.

/// A key the input box reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Return / Enter
    Enter,
    /// A printable character
    Char(char),
    /// Anything else
    Other,
}

/// One key press with modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// Key pressed
    pub key: Key,
    /// Shift held
    pub shift: bool,
    /// Control held
    pub ctrl: bool,
    /// Alt/Option held
    pub alt: bool,
}

impl KeyPress {
    /// Unmodified key press
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            ctrl: false,
            alt: false,
        }
    }

    /// Unmodified Enter
    pub fn enter() -> Self {
        Self::plain(Key::Enter)
    }

    /// Enter with Shift held
    pub fn shift_enter() -> Self {
        Self {
            shift: true,
            ..Self::enter()
        }
    }

    /// Whether this press should submit the draft
    ///
    /// # Examples
    ///
    /// ```
    /// use solace::session::{Key, KeyPress};
    ///
    /// assert!(KeyPress::enter().submits());
    /// assert!(!KeyPress::shift_enter().submits());
    /// assert!(!KeyPress::plain(Key::Char('a')).submits());
    /// ```
    pub fn submits(&self) -> bool {
        self.key == Key::Enter && !self.shift && !self.ctrl && !self.alt
    }
}
