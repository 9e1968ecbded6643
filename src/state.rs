//! Countdown state for the dial timer.
//!
//! [`TimerState`] holds the three values the whole UI is derived from: whole
//! seconds left, milliseconds left within the current second, and whether the
//! countdown is running. It is mutated only by the tick driver
//! ([`TimerState::tick`]) and by the toggle control
//! ([`TimerState::toggle_run`]).
//!
//! ```rust
//! use dial_timer::state::TimerState;
//!
//! let mut state = TimerState::new();
//! assert_eq!((state.seconds_left(), state.millis_left()), (60, 0));
//!
//! // Stopped timers ignore ticks.
//! assert!(!state.tick());
//!
//! state.toggle_run();
//! assert!(state.tick());
//! assert_eq!((state.seconds_left(), state.millis_left()), (59, 999));
//! ```

use tracing::{debug, trace};

/// Length of the countdown in whole seconds.
pub const COUNTDOWN_SECONDS: u32 = 60;

/// Ticks that make up one second.
pub const MILLIS_PER_SECOND: u32 = 1000;

/// The user-visible mode of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not counting down. Initial phase.
    Stopped,
    /// Counting down.
    Started,
    /// Reached zero. Ticks no longer have any effect.
    Finished,
}

/// A read-only copy of the state, handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    /// Whole seconds left, `0..=60`.
    pub seconds_left: u32,
    /// Milliseconds left in the current second, `0..=999`.
    pub millis_left: u32,
    /// Whether the countdown is running.
    pub running: bool,
}

/// The mutable countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    seconds_left: u32,
    millis_left: u32,
    running: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// Creates a stopped timer with the full 60 seconds left.
    pub fn new() -> Self {
        Self {
            seconds_left: COUNTDOWN_SECONDS,
            millis_left: 0,
            running: false,
        }
    }

    /// Builds a state from raw values, clamping them into range.
    ///
    /// Seconds are capped at 60 and milliseconds at 999. A state with no
    /// seconds left always has no milliseconds left either.
    pub fn from_parts(seconds_left: u32, millis_left: u32, running: bool) -> Self {
        let seconds_left = seconds_left.min(COUNTDOWN_SECONDS);
        let millis_left = if seconds_left == 0 {
            0
        } else {
            millis_left.min(MILLIS_PER_SECOND - 1)
        };
        Self {
            seconds_left,
            millis_left,
            running,
        }
    }

    /// Whole seconds left.
    pub fn seconds_left(&self) -> u32 {
        self.seconds_left
    }

    /// Milliseconds left within the current second.
    pub fn millis_left(&self) -> u32 {
        self.millis_left
    }

    /// Whether the user has the timer running.
    ///
    /// This is the raw flag; a finished timer may still report `true`.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.seconds_left == 0
    }

    /// The current phase. Finished takes priority over the run flag.
    pub fn phase(&self) -> Phase {
        if self.is_finished() {
            Phase::Finished
        } else if self.running {
            Phase::Started
        } else {
            Phase::Stopped
        }
    }

    /// Copies the current values out for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seconds_left: self.seconds_left,
            millis_left: self.millis_left,
            running: self.running,
        }
    }

    /// Flips the run flag. Counters are left alone.
    ///
    /// Allowed after the countdown finished, where it has no visible effect.
    pub fn toggle_run(&mut self) {
        self.running = !self.running;
        debug!(
            running = self.running,
            seconds_left = self.seconds_left,
            millis_left = self.millis_left,
            "timer toggled"
        );
    }

    /// Advances the countdown by one millisecond.
    ///
    /// Returns `true` if the state changed. Does nothing while stopped or
    /// once no seconds are left.
    ///
    /// When the millisecond counter is already at zero a whole second is
    /// taken instead. The counter then restarts at 1000 and is decremented
    /// in the same step, so 999 is the largest value ever observed and each
    /// second lasts exactly 1000 ticks.
    pub fn tick(&mut self) -> bool {
        if !self.running || self.seconds_left == 0 {
            return false;
        }

        if self.millis_left > 0 {
            self.millis_left -= 1;
        } else {
            self.seconds_left = self.seconds_left.saturating_sub(1);
            self.millis_left = if self.seconds_left > 0 {
                MILLIS_PER_SECOND - 1
            } else {
                0
            };
            if self.seconds_left == 0 {
                debug!("countdown finished");
            }
        }

        trace!(
            seconds_left = self.seconds_left,
            millis_left = self.millis_left,
            "tick"
        );
        true
    }
}
