#![warn(missing_docs)]

//! # dial-timer
//!
//! A 60-second circular countdown timer for the terminal, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) and styled with
//! lipgloss.
//!
//! ## Overview
//!
//! The screen shows a dial of 60 marks around a `"<seconds> : <millis>"`
//! label, with a start/stop button underneath. Every component follows the
//! Elm Architecture: messages go into `update()`, which may return a
//! command, and `view()` draws the current state as a string.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`state`] | The countdown values and the tick rule |
//! | [`driver`] | Tick chain that advances the countdown |
//! | [`dial`] | Pure frame description and its terminal rasterizer |
//! | [`toggle`] | Start/stop button |
//! | [`widget`] | The screen tying everything together |
//! | [`key`], [`help`] | Key bindings and key hints |
//! | [`config`] | Command-line configuration |
//!
//! ## Driving the countdown by hand
//!
//! ```rust
//! use dial_timer::prelude::*;
//!
//! let mut state = TimerState::new();
//! state.toggle_run();
//! for _ in 0..1000 {
//!     state.tick();
//! }
//! assert_eq!((state.seconds_left(), state.millis_left()), (59, 0));
//!
//! let frame = render(&state.snapshot());
//! assert_eq!(frame.elapsed_count(), 1);
//! assert_eq!(frame.label, "59 : 0");
//! ```

pub mod config;
pub mod dial;
pub mod driver;
pub mod help;
pub mod key;
pub mod state;
pub mod toggle;
pub mod widget;

pub use dial::{render, Dial, Mark, MarkKind, RenderedFrame};
pub use driver::{FinishedMsg, TickDriver, TickMsg};
pub use state::{Phase, Snapshot, TimerState};
pub use toggle::{Toggle, ToggleMsg};
pub use widget::Model as TimerWidget;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::dial::{render, Dial, MarkKind, RenderedFrame};
    pub use crate::driver::{FinishedMsg, TickDriver, TickMsg};
    pub use crate::key::Binding;
    pub use crate::state::{Phase, Snapshot, TimerState};
    pub use crate::toggle::{Toggle, ToggleMsg};
    pub use crate::widget::Model as TimerWidget;
}
