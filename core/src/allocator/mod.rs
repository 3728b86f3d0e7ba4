//! Staff allocator
//!
//! Matches available responders to residents and enforces the
//! one-active-task-per-responder discipline. Manual claims delegate to
//! the tracker guards; automatic distribution walks the triage lists in
//! priority order and picks responders through a pluggable
//! `AssignmentStrategy`.
//!
//! # Invariant
//!
//! The set of Busy responders is always exactly the set of task-bearing
//! responders; no responder is ever double-booked. Both properties follow
//! from routing every binding through `tracker::mark_in_progress`.
//!
//! # Strategies
//!
//! 1. **LocationFirst**: prefer a responder already located in the
//!    resident's wing, fall back to any available responder
//! 2. **FirstAvailable**: first available responder in roster order
//!    (baseline)

use crate::models::resident::Resident;
use crate::models::responder::{Responder, ResponderStatus};
use crate::models::roster::Roster;
use crate::tracker::{self, TrackerError};
use crate::triage::TriagePartition;
use serde::{Deserialize, Serialize};

mod first_available;
mod location_first;

pub use first_available::FirstAvailable;
pub use location_first::LocationFirst;

/// Responder-selection strategy for automatic task distribution.
///
/// Implementations must be deterministic over roster order: the same
/// roster state always yields the same pick, so a replayed journal makes
/// the same decisions.
pub trait AssignmentStrategy {
    /// Pick an available responder for the resident, or `None` when
    /// every responder is busy or offline.
    fn select_responder<'a>(&self, resident: &Resident, roster: &'a Roster)
        -> Option<&'a Responder>;
}

/// One (resident, responder) pair applied by `auto_assign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub resident_id: String,
    pub responder_id: String,
    /// Location descriptor handed to the responder
    pub task: String,
}

/// Claim a resident for a responder.
///
/// Thin delegation to `tracker::mark_in_progress`, which re-checks
/// availability under the same guards — the allocator adds no state of
/// its own, so there is nothing to get out of sync.
pub fn assign(
    roster: &mut Roster,
    resident_id: &str,
    responder_id: &str,
) -> Result<(), TrackerError> {
    tracker::mark_in_progress(roster, resident_id, responder_id)
}

/// Free a responder without touching the resident's evacuation status.
///
/// Used when a responder is reassigned or pulled away mid-task. The
/// resident keeps `InProgress` but loses the binding, surfacing as an
/// abandoned task (see `tracker::abandoned_residents`) instead of
/// silently resetting to Pending. Returns the id of the resident that
/// was unbound, if any. Releasing an idle responder is a no-op.
pub fn release(roster: &mut Roster, responder_id: &str) -> Result<Option<String>, TrackerError> {
    if roster.get_responder(responder_id).is_none() {
        return Err(TrackerError::UnknownResponder(responder_id.to_string()));
    }

    let resident_id = roster
        .resident_assigned_to(responder_id)
        .map(|r| r.id().to_string());
    if let Some(id) = &resident_id {
        if let Some(resident) = roster.get_resident_mut(id) {
            resident.unbind_responder();
        }
    }
    if let Some(responder) = roster.get_responder_mut(responder_id) {
        // Offline responders stay offline; only a working responder has
        // a task to clear.
        if responder.status() == ResponderStatus::Busy {
            responder.clear_task();
        }
    }
    Ok(resident_id)
}

/// Release a responder and mark it unreachable for the rest of the
/// session. Offline responders are never selected by any strategy.
pub fn mark_offline(
    roster: &mut Roster,
    responder_id: &str,
) -> Result<Option<String>, TrackerError> {
    let resident_id = release(roster, responder_id)?;
    if let Some(responder) = roster.get_responder_mut(responder_id) {
        responder.set_offline();
    }
    Ok(resident_id)
}

/// Distribute available responders over residents still needing help.
///
/// Walks the triage lists in priority order (critical, then urgent;
/// mobile residents self-evacuate and are skipped), claiming one
/// responder per resident through the tracker guards. Residents already
/// assigned or completed are skipped; abandoned residents are picked up
/// again. Stops early when the strategy runs out of responders.
pub fn auto_assign(
    roster: &mut Roster,
    triage: &TriagePartition,
    strategy: &dyn AssignmentStrategy,
) -> Vec<Assignment> {
    let candidates: Vec<String> = triage
        .assisted_order()
        .filter(|id| {
            roster
                .get_resident(*id)
                .is_some_and(|r| r.assigned_responder().is_none() && !is_completed(r))
        })
        .map(str::to_string)
        .collect();

    let mut applied = Vec::new();
    for resident_id in candidates {
        let Some(resident) = roster.get_resident(&resident_id) else {
            continue;
        };
        let Some(responder) = strategy.select_responder(resident, roster) else {
            break; // nobody left to assign
        };
        let responder_id = responder.id().to_string();
        let task = resident.location();
        if tracker::mark_in_progress(roster, &resident_id, &responder_id).is_ok() {
            applied.push(Assignment {
                resident_id,
                responder_id,
                task,
            });
        }
    }
    applied
}

fn is_completed(resident: &Resident) -> bool {
    resident.evacuation_status() == crate::models::resident::EvacuationStatus::Completed
}

/// First available responder in roster order, optionally restricted to a
/// wing. Shared by the concrete strategies.
fn first_available<'a>(roster: &'a Roster, wing: Option<&str>) -> Option<&'a Responder> {
    roster.responders_in_order().find(|s| {
        s.status() == ResponderStatus::Available
            && wing.map_or(true, |w| s.current_location() == w)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resident::{EvacuationStatus, MedicalPriority, MobilityStatus};
    use crate::triage::classify;

    fn resident(id: &str, wing: &str, mobility: MobilityStatus) -> Resident {
        Resident::new(
            id.to_string(),
            format!("Resident {}", id),
            "101".to_string(),
            wing.to_string(),
            mobility,
            MedicalPriority::Stable,
        )
    }

    fn responder(id: &str, wing: &str) -> Responder {
        Responder::new(
            id.to_string(),
            format!("Responder {}", id),
            "Nurse".to_string(),
            wing.to_string(),
        )
    }

    #[test]
    fn test_release_leaves_resident_in_progress() {
        let mut roster = Roster::new(
            vec![resident("r1", "East Wing", MobilityStatus::Bedridden)],
            vec![responder("s1", "East Wing")],
        );
        assign(&mut roster, "r1", "s1").unwrap();

        let unbound = release(&mut roster, "s1").unwrap();
        assert_eq!(unbound.as_deref(), Some("r1"));
        assert!(roster.get_responder("s1").unwrap().is_available());
        assert_eq!(
            roster.get_resident("r1").unwrap().evacuation_status(),
            EvacuationStatus::InProgress
        );
        assert!(roster.get_resident("r1").unwrap().is_abandoned());
    }

    #[test]
    fn test_release_idle_responder_is_noop() {
        let mut roster = Roster::new(vec![], vec![responder("s1", "East Wing")]);
        assert_eq!(release(&mut roster, "s1").unwrap(), None);
        assert!(roster.get_responder("s1").unwrap().is_available());
    }

    #[test]
    fn test_release_unknown_responder() {
        let mut roster = Roster::new(vec![], vec![]);
        assert_eq!(
            release(&mut roster, "ghost").unwrap_err(),
            TrackerError::UnknownResponder("ghost".to_string())
        );
    }

    #[test]
    fn test_mark_offline_removes_responder_from_selection() {
        let mut roster = Roster::new(
            vec![resident("r1", "East Wing", MobilityStatus::Bedridden)],
            vec![responder("s1", "East Wing")],
        );
        mark_offline(&mut roster, "s1").unwrap();
        assert_eq!(
            roster.get_responder("s1").unwrap().status(),
            ResponderStatus::Offline
        );
        assert!(matches!(
            assign(&mut roster, "r1", "s1").unwrap_err(),
            TrackerError::ResponderOffline { .. }
        ));
    }

    #[test]
    fn test_auto_assign_covers_critical_then_urgent() {
        let mut roster = Roster::new(
            vec![
                resident("r1", "East Wing", MobilityStatus::Wheelchair),
                resident("r2", "West Wing", MobilityStatus::Bedridden),
                resident("r3", "South Wing", MobilityStatus::Ambulatory),
            ],
            vec![responder("s1", "West Wing"), responder("s2", "East Wing")],
        );
        let triage = classify(&roster);

        let applied = auto_assign(&mut roster, &triage, &LocationFirst);

        // Bedridden r2 gets a responder before wheelchair r1; ambulatory
        // r3 is skipped entirely.
        assert_eq!(applied.len(), 2);
        assert_eq!(applied[0].resident_id, "r2");
        assert_eq!(applied[0].responder_id, "s1"); // same wing
        assert_eq!(applied[1].resident_id, "r1");
        assert_eq!(applied[1].responder_id, "s2");
        assert!(roster.get_resident("r3").unwrap().assigned_responder().is_none());
    }

    #[test]
    fn test_auto_assign_stops_when_out_of_responders() {
        let mut roster = Roster::new(
            vec![
                resident("r1", "East Wing", MobilityStatus::Bedridden),
                resident("r2", "East Wing", MobilityStatus::Bedridden),
            ],
            vec![responder("s1", "East Wing")],
        );
        let triage = classify(&roster);

        let applied = auto_assign(&mut roster, &triage, &FirstAvailable);
        assert_eq!(applied.len(), 1);
        assert_eq!(
            roster.get_resident("r2").unwrap().evacuation_status(),
            EvacuationStatus::Pending
        );
    }

    #[test]
    fn test_auto_assign_never_double_books() {
        let mut roster = Roster::new(
            vec![
                resident("r1", "East Wing", MobilityStatus::Bedridden),
                resident("r2", "East Wing", MobilityStatus::Wheelchair),
            ],
            vec![responder("s1", "East Wing"), responder("s2", "North Wing")],
        );
        let triage = classify(&roster);

        let applied = auto_assign(&mut roster, &triage, &LocationFirst);
        assert_eq!(applied.len(), 2);
        assert_ne!(applied[0].responder_id, applied[1].responder_id);
        assert_eq!(roster.num_busy_responders(), 2);
    }
}
