//! Typed key bindings for the timer widget.
//!
//! A [`Binding`] groups one or more [`KeyPress`]es with the short help text
//! shown in the key hint line. Bindings are matched against the
//! [`bubbletea_rs::KeyMsg`] events delivered to `update()`.
//!
//! ```rust
//! use dial_timer::key::Binding;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let toggle = Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
//!     .with_help("space", "start/stop");
//! let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
//!     .with_help("ctrl+c", "quit");
//!
//! assert_eq!(toggle.help().key, "space");
//! assert!(quit.enabled());
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

impl KeyPress {
    /// Reports whether `msg` is this key combination.
    ///
    /// Shift is ignored for character keys unless the press asks for it,
    /// since terminals disagree on whether they report it.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        let mut mods = msg.modifiers;
        if matches!(self.code, KeyCode::Char(_)) && !self.mods.contains(KeyModifiers::SHIFT) {
            mods.remove(KeyModifiers::SHIFT);
        }
        mods == self.mods
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// How the key is displayed, e.g. `"space"`.
    pub key: String,
    /// What the key does, e.g. `"start/stop"`.
    pub desc: String,
}

/// A set of keys that trigger one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given keys with empty help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text shown for this binding.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the binding with its enabled state set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.disabled = !enabled;
        self
    }

    /// Enables or disables the binding in place.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Disabled bindings never match and are hidden from help.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Reports whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_key_matches() {
        let b = Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter]);
        assert!(b.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(!b.matches(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_modifiers_must_agree() {
        let b = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)]);
        assert!(b.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));

        let q = Binding::new(vec![KeyCode::Char('q')]);
        assert!(!q.matches(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let b = Binding::new(vec![KeyCode::Char('?')]);
        assert!(b.matches(&key(KeyCode::Char('?'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec![KeyCode::Enter]).with_help("enter", "go");
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!b.matches(&key(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!Binding::new(Vec::<KeyCode>::new()).enabled());
    }
}
