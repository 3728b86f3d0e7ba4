//! Countdown time source
//!
//! The activation abort window is a fixed number of discrete ticks. A
//! single authoritative timer in the host drives `tick()`; the engine
//! never spawns its own timer thread, so the countdown stays
//! deterministic and testable. If the hosting process restarts
//! mid-countdown, the session is lost — acceptable, because the countdown
//! is an advisory abort window, not safety-critical state.

use serde::{Deserialize, Serialize};

/// Fixed abort window before a session goes Active (reference behavior:
/// three one-second ticks).
pub const DEFAULT_COUNTDOWN_TICKS: u32 = 3;

/// Outcome of advancing the countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still inside the abort window
    Ticking { remaining: u32 },

    /// Window closed; the session transitions into Active
    Elapsed,
}

/// Discrete countdown driven by the host's timer.
///
/// # Example
/// ```
/// use crisis_coordination_core::core::countdown::{CountdownStep, CountdownTimer};
///
/// let mut timer = CountdownTimer::new(3);
/// assert_eq!(timer.tick(), CountdownStep::Ticking { remaining: 2 });
/// assert_eq!(timer.tick(), CountdownStep::Ticking { remaining: 1 });
/// assert_eq!(timer.tick(), CountdownStep::Elapsed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownTimer {
    /// Ticks left before the window closes
    remaining: u32,

    /// Window length at creation
    initial: u32,
}

impl CountdownTimer {
    /// Create a countdown of `ticks` discrete steps.
    ///
    /// # Panics
    /// Panics if `ticks` is zero — a zero-length abort window is a
    /// configuration error, caught earlier by config validation.
    pub fn new(ticks: u32) -> Self {
        assert!(ticks > 0, "countdown ticks must be positive");
        Self {
            remaining: ticks,
            initial: ticks,
        }
    }

    /// Advance by one tick. Saturates at zero: ticking an elapsed
    /// countdown keeps reporting `Elapsed`.
    pub fn tick(&mut self) -> CountdownStep {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            CountdownStep::Elapsed
        } else {
            CountdownStep::Ticking {
                remaining: self.remaining,
            }
        }
    }

    /// Ticks left before the window closes.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Window length at creation.
    pub fn initial(&self) -> u32 {
        self.initial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "countdown ticks must be positive")]
    fn test_zero_ticks_panics() {
        CountdownTimer::new(0);
    }

    #[test]
    fn test_full_window() {
        let mut timer = CountdownTimer::new(3);
        assert_eq!(timer.remaining(), 3);
        assert_eq!(timer.tick(), CountdownStep::Ticking { remaining: 2 });
        assert_eq!(timer.tick(), CountdownStep::Ticking { remaining: 1 });
        assert_eq!(timer.tick(), CountdownStep::Elapsed);
    }

    #[test]
    fn test_tick_saturates_after_elapsed() {
        let mut timer = CountdownTimer::new(1);
        assert_eq!(timer.tick(), CountdownStep::Elapsed);
        assert_eq!(timer.tick(), CountdownStep::Elapsed);
        assert_eq!(timer.remaining(), 0);
    }
}
