//! The dial timer screen.
//!
//! [`Model`] owns the countdown [`TimerState`] for as long as the screen
//! lives and wires the other components to it: the [`TickDriver`] advances
//! it, the [`Toggle`] flips it, and `view()` draws it through the dial
//! renderer. The bubbletea runtime calls `view()` after every `update()`, so
//! the screen always shows the latest state.
//!
//! # bubbletea-rs Integration
//!
//! ```rust,ignore
//! use bubbletea_rs::Program;
//! use dial_timer::widget::Model;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let program = Program::<Model>::builder().alt_screen(true).build()?;
//!     program.run().await?;
//!     Ok(())
//! }
//! ```

use crate::config::Settings;
use crate::dial::{self, Dial, RenderedFrame};
use crate::driver::{FinishedMsg, TickDriver};
use crate::help;
use crate::key::{Binding, KeyPress};
use crate::state::{Phase, Snapshot, TimerState};
use crate::toggle::{Toggle, ToggleMsg};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use tracing::info;

// Rows below the dial: blank, button, blank, help.
const CHROME_ROWS: usize = 4;

/// Screen-level key bindings. The start/stop key belongs to the [`Toggle`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Switch between short and full help.
    pub help: Binding,
    /// Leave the program.
    pub quit: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "help"),
            quit: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from(KeyCode::Esc),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q", "quit"),
        }
    }
}

/// The dial timer screen.
#[derive(Debug, Clone)]
pub struct Model {
    /// Screen key bindings.
    pub keys: KeyMap,

    state: TimerState,
    driver: TickDriver,
    toggle: Toggle,
    dial: Dial,
    help: help::Model,
    preferred_radius: usize,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates the screen from the installed [`Settings`].
    pub fn new() -> Self {
        Self::with_settings(Settings::current())
    }

    /// Creates the screen with explicit settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            keys: KeyMap::default(),
            state: TimerState::new(),
            driver: TickDriver::with_interval(settings.interval),
            toggle: Toggle::new(),
            dial: Dial::new().with_radius(settings.radius),
            help: help::Model::new(),
            preferred_radius: settings.radius,
        }
    }

    /// The countdown.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// The tick driver.
    pub fn driver(&self) -> &TickDriver {
        &self.driver
    }

    /// The start/stop button.
    pub fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    /// The dial rasterizer.
    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    /// Current values of the countdown.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Current phase of the countdown.
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// The frame the dial currently shows.
    pub fn frame(&self) -> RenderedFrame {
        dial::render(&self.state.snapshot())
    }

    /// Flips the run flag, as activating the button does.
    pub fn on_toggle(&mut self) {
        self.state.toggle_run();
    }

    /// Starts the tick driver.
    pub fn start(&self) -> Option<Cmd> {
        self.driver.init(&self.state)
    }

    /// Shrinks the dial to fit the terminal, never growing it past the
    /// configured radius. Key hints are cut to the terminal width.
    pub fn fit_to(&mut self, width: usize, height: usize) {
        self.help.width = width;
        let by_height = height.saturating_sub(CHROME_ROWS + 1) / 2;
        let by_width = width.saturating_sub(1) / 4;
        let radius = self.preferred_radius.min(by_height).min(by_width);
        self.dial.set_radius(radius);
    }

    /// Handles keys, button presses, ticks and resizes.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(toggle_msg) = msg.downcast_ref::<ToggleMsg>() {
            if self.toggle.owns(toggle_msg) {
                self.on_toggle();
            }
            return None;
        }

        if let Some(finished) = msg.downcast_ref::<FinishedMsg>() {
            if finished.id == self.driver.id() {
                info!("countdown finished");
            }
            return None;
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.fit_to(size.width as usize, size.height as usize);
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keys.quit.matches(key_msg) {
                return Some(bubbletea_rs::quit());
            }
            if self.keys.help.matches(key_msg) {
                self.help.show_all = !self.help.show_all;
                return None;
            }
            return self.toggle.update(&msg);
        }

        self.driver.update(&mut self.state, &msg)
    }

    /// Renders the dial, the button and the key hints.
    pub fn view(&self) -> String {
        let width = self.dial.width();
        let dial = self.dial.view(&self.frame());
        let button = center(&self.toggle.view(self.state.running()), width);
        let hints = self
            .help
            .view(self)
            .lines()
            .map(|line| center(line, width))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n\n{}\n\n{}", dial, button, hints)
    }
}

impl help::KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.toggle.binding, &self.keys.help, &self.keys.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.toggle.binding],
            vec![&self.keys.help, &self.keys.quit],
        ]
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::new();
        let cmd = model.start();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

fn center(line: &str, width: usize) -> String {
    let pad = width.saturating_sub(lipgloss::width_visible(line)) / 2;
    format!("{}{}", " ".repeat(pad), line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_starts_stopped_with_full_dial() {
        let model = Model::with_settings(Settings::default());
        assert_eq!(model.phase(), Phase::Stopped);
        assert_eq!(model.frame().elapsed_count(), 0);
        assert!(model.start().is_some());
    }

    #[test]
    fn test_toggle_msg_flips_state() {
        let mut model = Model::with_settings(Settings::default());
        let id = model.toggle().id();
        assert!(model.update(Box::new(ToggleMsg { id })).is_none());
        assert_eq!(model.phase(), Phase::Started);
        model.update(Box::new(ToggleMsg { id }));
        assert_eq!(model.phase(), Phase::Stopped);
    }

    #[test]
    fn test_foreign_toggle_ignored() {
        let mut model = Model::with_settings(Settings::default());
        let other = Toggle::new();
        model.update(Box::new(ToggleMsg { id: other.id() }));
        assert_eq!(model.phase(), Phase::Stopped);
    }

    #[test]
    fn test_keys() {
        let mut model = Model::with_settings(Settings::default());
        assert!(model.update(key(KeyCode::Char(' '))).is_some());
        assert!(model.update(key(KeyCode::Char('q'))).is_some());
        assert!(model.update(key(KeyCode::Char('?'))).is_none());
        assert!(model.help.show_all);
        // unbound keys leave the state alone
        assert!(model.update(key(KeyCode::Char('z'))).is_none());
        assert_eq!(model.snapshot(), TimerState::new().snapshot());
    }

    #[test]
    fn test_fit_to_shrinks_but_never_grows() {
        let mut model = Model::with_settings(Settings {
            radius: 10,
            ..Settings::default()
        });
        model.fit_to(200, 20);
        assert_eq!(model.dial().radius, 7);
        model.fit_to(200, 200);
        assert_eq!(model.dial().radius, 10);
        model.fit_to(10, 10);
        assert_eq!(model.dial().radius, dial::MIN_RADIUS);
    }

    #[test]
    fn test_narrow_terminal_cuts_hints() {
        let mut model = Model::with_settings(Settings::default());
        model.update(Box::new(WindowSizeMsg {
            width: 22,
            height: 40,
        }));

        let view = strip_ansi_escapes::strip_str(model.view());
        let hints = view.lines().last().unwrap_or_default().trim();
        assert!(hints.starts_with("space start/stop"));
        assert!(hints.ends_with('…'));
        assert!(!hints.contains("quit"));
        for line in view.lines() {
            assert!(lipgloss::width_visible(line) <= 22, "{:?} is too wide", line);
        }
    }

    #[test]
    fn test_view_layout() {
        let model = Model::with_settings(Settings::default());
        let view = strip_ansi_escapes::strip_str(model.view());
        assert!(view.contains("60 : 0"));
        assert!(view.contains("▶ start"));
        assert!(view.contains("space start/stop"));
        assert_eq!(view.lines().count(), model.dial().height() + CHROME_ROWS);
    }
}
