//! Evacuation tracker
//!
//! Owns the per-resident evacuation state machine and the
//! resident ↔ responder assignment bindings. All functions operate on the
//! session's roster snapshot; the coordinator serializes access (one
//! logical writer at a time), so each operation is a short, non-blocking
//! critical section with no I/O.
//!
//! # State machine per resident
//!
//! ```text
//! Pending ──mark_in_progress──▶ InProgress ──mark_completed──▶ Completed
//!    │                                                            ▲
//!    └────────── mark_completed (no responder bound) ─────────────┘
//! ```
//!
//! The Pending → Completed shortcut covers self-evacuating residents and
//! is permitted only when no responder is bound. There is no transition
//! out of Completed, and no operation ever regresses a status.
//!
//! # Failure semantics
//!
//! Every guard failure is an immediate, synchronous error that leaves all
//! state untouched — no partial mutation, no silent overwrite. When two
//! responders race to claim the same resident, the last to arrive loses
//! with `ResidentAlreadyAssigned` naming the incumbent, so duplicate
//! effort is caught in real time.

use crate::models::resident::EvacuationStatus;
use crate::models::responder::ResponderStatus;
use crate::models::roster::Roster;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by assignment and completion guards.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackerError {
    #[error("unknown resident: {0}")]
    UnknownResident(String),

    #[error("unknown responder: {0}")]
    UnknownResponder(String),

    #[error("resident {resident_id} already assigned to {responder_id}")]
    ResidentAlreadyAssigned {
        resident_id: String,
        responder_id: String,
    },

    #[error("resident {resident_id} already evacuated")]
    ResidentAlreadyEvacuated { resident_id: String },

    #[error("responder {responder_id} busy with task: {task}")]
    ResponderBusy { responder_id: String, task: String },

    #[error("responder {responder_id} is offline")]
    ResponderOffline { responder_id: String },
}

/// Session-wide completion gauge. Computed on every call, never cached,
/// so concurrent updates cannot leave it stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub total: usize,
}

impl ProgressSummary {
    /// Completion fraction in [0, 1]; 1.0 for an empty roster.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Bind a responder to a resident and start the evacuation.
///
/// Guards, in order:
/// 1. Resident and responder exist in the snapshot
/// 2. Resident is not Completed and has no responder bound
///    (an InProgress resident with no responder — an abandoned task —
///    may be re-bound; that is the recovery path for released tasks)
/// 3. Responder is Available
///
/// On success the resident moves to InProgress with the responder bound,
/// and the responder becomes Busy with the resident's location descriptor
/// as its task.
pub fn mark_in_progress(
    roster: &mut Roster,
    resident_id: &str,
    responder_id: &str,
) -> Result<(), TrackerError> {
    let resident = roster
        .get_resident(resident_id)
        .ok_or_else(|| TrackerError::UnknownResident(resident_id.to_string()))?;
    let responder = roster
        .get_responder(responder_id)
        .ok_or_else(|| TrackerError::UnknownResponder(responder_id.to_string()))?;

    if resident.evacuation_status() == EvacuationStatus::Completed {
        return Err(TrackerError::ResidentAlreadyEvacuated {
            resident_id: resident_id.to_string(),
        });
    }
    if let Some(incumbent) = resident.assigned_responder() {
        return Err(TrackerError::ResidentAlreadyAssigned {
            resident_id: resident_id.to_string(),
            responder_id: incumbent.to_string(),
        });
    }
    match responder.status() {
        ResponderStatus::Available => {}
        ResponderStatus::Busy => {
            return Err(TrackerError::ResponderBusy {
                responder_id: responder_id.to_string(),
                task: responder.assigned_task().unwrap_or_default().to_string(),
            });
        }
        ResponderStatus::Offline => {
            return Err(TrackerError::ResponderOffline {
                responder_id: responder_id.to_string(),
            });
        }
    }

    let task = resident.location();
    // Guards passed; apply both sides of the binding.
    if let Some(resident) = roster.get_resident_mut(resident_id) {
        resident.bind_responder(responder_id.to_string());
    }
    if let Some(responder) = roster.get_responder_mut(responder_id) {
        responder.assign_task(task);
    }
    Ok(())
}

/// Complete a resident's evacuation and free the bound responder, if any.
///
/// Valid from InProgress, or from Pending when no responder is bound
/// (the self-evacuation shortcut). Returns the id of the released
/// responder. Completed is terminal.
pub fn mark_completed(
    roster: &mut Roster,
    resident_id: &str,
) -> Result<Option<String>, TrackerError> {
    let resident = roster
        .get_resident(resident_id)
        .ok_or_else(|| TrackerError::UnknownResident(resident_id.to_string()))?;

    if resident.evacuation_status() == EvacuationStatus::Completed {
        return Err(TrackerError::ResidentAlreadyEvacuated {
            resident_id: resident_id.to_string(),
        });
    }

    let released = roster
        .get_resident_mut(resident_id)
        .and_then(|resident| {
            resident.set_completed();
            resident.unbind_responder()
        });

    if let Some(responder_id) = &released {
        if let Some(responder) = roster.get_responder_mut(responder_id) {
            responder.clear_task();
        }
    }

    Ok(released)
}

/// Current completion gauge over the whole snapshot.
pub fn progress_summary(roster: &Roster) -> ProgressSummary {
    let mut summary = ProgressSummary {
        total: roster.num_residents(),
        ..ProgressSummary::default()
    };
    for resident in roster.residents_in_order() {
        match resident.evacuation_status() {
            EvacuationStatus::Pending => summary.pending += 1,
            EvacuationStatus::InProgress => summary.in_progress += 1,
            EvacuationStatus::Completed => summary.completed += 1,
        }
    }
    summary
}

/// Residents InProgress with no responder bound — tasks that were
/// released mid-evacuation and need a new responder. Surfaced to the UI
/// as an anomaly rather than silently reset to Pending.
pub fn abandoned_residents(roster: &Roster) -> Vec<String> {
    roster
        .residents_in_order()
        .filter(|r| r.is_abandoned())
        .map(|r| r.id().to_string())
        .collect()
}
