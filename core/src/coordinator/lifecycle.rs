//! Session lifecycle state machine
//!
//! Gates every other component:
//!
//! ```text
//! Idle ──request_activation──▶ Countdown ──tick×N──▶ Active ──deactivate(true)──▶ Terminated
//!           ▲                      │
//!           └──── abort_countdown ─┘
//! ```
//!
//! Deactivation requires explicit confirmation — the first, unconfirmed
//! call reports back without changing state, so a single stray click can
//! never end a live evacuation. Termination is irreversible for the
//! session. Every invalid transition fails with `InvalidTransition` and
//! leaves state untouched.

use crate::core::countdown::{CountdownStep, CountdownTimer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No session running
    Idle,

    /// Abort window open; ticking toward Active
    Countdown,

    /// Evacuation coordination live
    Active,

    /// Session over; terminal
    Terminated,
}

/// Session state machine violations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid transition: cannot {action} from {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        action: &'static str,
    },
}

/// The activation controller: phase, countdown, and session timestamps.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: SessionPhase,
    countdown: Option<CountdownTimer>,
    activated_at: Option<DateTime<Utc>>,
    deactivated_at: Option<DateTime<Utc>>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            countdown: None,
            activated_at: None,
            deactivated_at: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Ticks left in the abort window; `None` outside Countdown.
    pub fn countdown_remaining(&self) -> Option<u32> {
        match self.phase {
            SessionPhase::Countdown => self.countdown.as_ref().map(CountdownTimer::remaining),
            _ => None,
        }
    }

    pub fn activated_at(&self) -> Option<DateTime<Utc>> {
        self.activated_at
    }

    pub fn deactivated_at(&self) -> Option<DateTime<Utc>> {
        self.deactivated_at
    }

    /// Idle → Countdown, opening an abort window of `countdown_ticks`.
    pub fn request_activation(&mut self, countdown_ticks: u32) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Idle {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "activate",
            });
        }
        self.countdown = Some(CountdownTimer::new(countdown_ticks));
        self.phase = SessionPhase::Countdown;
        Ok(())
    }

    /// Advance the countdown by one tick. On the final tick the phase
    /// moves to Active and `activated_at` is stamped; the caller then
    /// captures the roster snapshot and runs triage.
    pub fn tick(&mut self) -> Result<CountdownStep, SessionError> {
        let timer = match (self.phase, self.countdown.as_mut()) {
            (SessionPhase::Countdown, Some(timer)) => timer,
            _ => {
                return Err(SessionError::InvalidTransition {
                    from: self.phase,
                    action: "tick the countdown",
                });
            }
        };

        let step = timer.tick();
        if step == CountdownStep::Elapsed {
            self.phase = SessionPhase::Active;
            self.countdown = None;
            self.activated_at = Some(Utc::now());
        }
        Ok(step)
    }

    /// Countdown → Idle. Only the abort window is cancellable; once
    /// Active, the confirmed deactivation path is the only way out.
    pub fn abort_countdown(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Countdown {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "abort the countdown",
            });
        }
        self.countdown = None;
        self.phase = SessionPhase::Idle;
        Ok(())
    }

    /// Active → Terminated, gated on explicit confirmation.
    ///
    /// Returns `Ok(false)` for the unconfirmed first step (state
    /// unchanged — the caller prompts the operator and calls again with
    /// `confirm = true`), `Ok(true)` once terminated.
    pub fn deactivate(&mut self, confirm: bool) -> Result<bool, SessionError> {
        if self.phase != SessionPhase::Active {
            return Err(SessionError::InvalidTransition {
                from: self.phase,
                action: "deactivate",
            });
        }
        if !confirm {
            return Ok(false);
        }
        self.phase = SessionPhase::Terminated;
        self.deactivated_at = Some(Utc::now());
        Ok(true)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
