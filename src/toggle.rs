//! Start/stop button for the dial timer.
//!
//! The button shows a stop icon while the countdown runs and a play icon
//! while it is stopped. Activating it does not touch the countdown directly;
//! like the timer component's start/stop commands it sends a [`ToggleMsg`],
//! and whoever owns the state flips it when the message comes back.
//!
//! ```rust
//! use dial_timer::toggle::Toggle;
//!
//! let button = Toggle::new();
//! assert_eq!(button.label(false), "▶ start");
//! assert_eq!(button.label(true), "■ stop");
//! let _cmd = button.activate();
//! ```

use crate::key;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Icon shown while the countdown runs.
pub const STOP_ICON: &str = "■";

/// Icon shown while the countdown is stopped.
pub const PLAY_ICON: &str = "▶";

/// Requests a flip of the run flag.
#[derive(Debug, Clone)]
pub struct ToggleMsg {
    /// Button that was activated.
    pub id: i64,
}

/// Styles for the two button faces.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Face shown while running.
    pub running: Style,
    /// Face shown while stopped.
    pub stopped: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            running: Style::new()
                .bold(true)
                .foreground(lipgloss::Color::from("#FFFFFF"))
                .background(lipgloss::Color::from("#C62828")),
            stopped: Style::new()
                .bold(true)
                .foreground(lipgloss::Color::from("#FFFFFF"))
                .background(lipgloss::Color::from("#1E88E5")),
        }
    }
}

/// The start/stop button.
#[derive(Debug, Clone)]
pub struct Toggle {
    /// Keys that activate the button.
    pub binding: key::Binding,
    /// Button faces.
    pub styles: Styles,

    id: i64,
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new()
    }
}

impl Toggle {
    /// Creates a button activated by space or enter.
    pub fn new() -> Self {
        Self {
            binding: key::Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "start/stop"),
            styles: Styles::default(),
            id: next_id(),
        }
    }

    /// Unique identifier of this button.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Icon for the given run flag.
    pub fn icon(&self, running: bool) -> &'static str {
        if running {
            STOP_ICON
        } else {
            PLAY_ICON
        }
    }

    /// Unstyled button text for the given run flag.
    pub fn label(&self, running: bool) -> String {
        let action = if running { "stop" } else { "start" };
        format!("{} {}", self.icon(running), action)
    }

    /// Returns a command that sends this button's [`ToggleMsg`].
    pub fn activate(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ToggleMsg { id }) as Msg
        })
    }

    /// Whether `msg` was produced by this button.
    pub fn owns(&self, msg: &ToggleMsg) -> bool {
        msg.id == 0 || msg.id == self.id
    }

    /// Activates the button when `msg` is one of its keys.
    pub fn update(&self, msg: &Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.binding.matches(key_msg) {
            return Some(self.activate());
        }
        None
    }

    /// Renders the button face for the given run flag.
    pub fn view(&self, running: bool) -> String {
        let style = if running {
            &self.styles.running
        } else {
            &self.styles.stopped
        };
        style
            .clone()
            .inline(true)
            .render(&format!("  {}  ", self.label(running)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_icon_follows_run_flag() {
        let button = Toggle::new();
        assert_eq!(button.icon(true), STOP_ICON);
        assert_eq!(button.icon(false), PLAY_ICON);
    }

    #[test]
    fn test_view_contains_label() {
        let button = Toggle::new();
        let stopped = strip_ansi_escapes::strip_str(button.view(false));
        let running = strip_ansi_escapes::strip_str(button.view(true));
        assert!(stopped.contains("▶ start"));
        assert!(running.contains("■ stop"));
    }

    #[test]
    fn test_keys_activate() {
        let button = Toggle::new();
        assert!(button.update(&key(KeyCode::Char(' '))).is_some());
        assert!(button.update(&key(KeyCode::Enter)).is_some());
        assert!(button.update(&key(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn test_ownership() {
        let a = Toggle::new();
        let b = Toggle::new();
        assert_ne!(a.id(), b.id());
        assert!(a.owns(&ToggleMsg { id: a.id() }));
        assert!(!a.owns(&ToggleMsg { id: b.id() }));
        assert!(a.owns(&ToggleMsg { id: 0 }));
    }

    #[tokio::test]
    async fn test_activate_sends_toggle_msg() {
        let button = Toggle::new();
        let msg = button.activate().await.expect("toggle message");
        let toggle = msg.downcast_ref::<ToggleMsg>().expect("ToggleMsg");
        assert_eq!(toggle.id, button.id());
    }
}
