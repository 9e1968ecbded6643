//! Tick driver for the dial timer.
//!
//! The driver is the countdown's clock. It schedules a [`TickMsg`] every
//! `interval` through `bubbletea_rs::tick`, advances the [`TimerState`] when
//! one arrives and schedules the next. The chain keeps going while the timer
//! is paused, so resuming needs no restart, and ends for good once no seconds
//! are left, at which point a single [`FinishedMsg`] is sent.
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Msg};
//! use dial_timer::driver::{FinishedMsg, TickDriver};
//! use dial_timer::state::TimerState;
//!
//! struct App {
//!     state: TimerState,
//!     driver: TickDriver,
//! }
//!
//! impl App {
//!     fn start(&self) -> Option<Cmd> {
//!         self.driver.init(&self.state)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if msg.downcast_ref::<FinishedMsg>().is_some() {
//!             // Countdown reached zero.
//!             return None;
//!         }
//!         self.driver.update(&mut self.state, &msg)
//!     }
//! }
//! ```

use crate::state::TimerState;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Cadence of the tick chain unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1);

// Internal ID management for driver instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Sent every interval to advance the countdown.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Driver this tick belongs to. Zero is accepted by every driver.
    pub id: i64,

    // Position in the tick chain. Stale ticks are dropped so that a second
    // chain never doubles the countdown speed.
    tag: i64,
}

/// Sent once when the countdown reaches zero.
#[derive(Debug, Clone)]
pub struct FinishedMsg {
    /// Driver that finished.
    pub id: i64,
}

/// Schedules ticks and applies them to a [`TimerState`].
#[derive(Debug, Clone)]
pub struct TickDriver {
    /// Time between ticks.
    pub interval: Duration,

    id: i64,
    tag: i64,
    done: bool,
}

impl Default for TickDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TickDriver {
    /// Creates a driver ticking every millisecond.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }

    /// Creates a driver with a custom tick interval.
    ///
    /// A zero interval is bumped to one millisecond.
    pub fn with_interval(interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_INTERVAL
        } else {
            interval
        };
        Self {
            interval,
            id: next_id(),
            tag: 0,
            done: false,
        }
    }

    /// Unique identifier of this driver.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the driver has stopped scheduling ticks for good.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Starts the tick chain.
    ///
    /// Returns `None` when the state is already finished.
    pub fn init(&self, state: &TimerState) -> Option<Cmd> {
        if self.done || state.is_finished() {
            return None;
        }
        debug!(id = self.id, interval = ?self.interval, "tick driver started");
        Some(self.tick())
    }

    /// A tick message for the current point of the chain.
    ///
    /// Feeding it to [`TickDriver::update`] behaves like the scheduled tick.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;

        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn finished(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(FinishedMsg { id }) as Msg
        })
    }

    /// Applies a tick to `state` and schedules the next one.
    ///
    /// Messages for other drivers, stale ticks and anything arriving after
    /// the countdown finished are ignored. Returns the next tick command, the
    /// one-off [`FinishedMsg`] command, or `None`.
    pub fn update(&mut self, state: &mut TimerState, msg: &Msg) -> Option<Cmd> {
        let tick_msg = msg.downcast_ref::<TickMsg>()?;

        if tick_msg.id != 0 && tick_msg.id != self.id {
            return None;
        }
        if tick_msg.tag > 0 && tick_msg.tag != self.tag {
            return None;
        }
        if self.done {
            return None;
        }

        state.tick();

        if state.is_finished() {
            self.done = true;
            debug!(id = self.id, "tick driver done");
            return Some(self.finished());
        }

        self.tag += 1;
        Some(self.tick())
    }
}
