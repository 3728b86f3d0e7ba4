//! Resident model
//!
//! Represents a beneficiary of the facility during an evacuation session.
//! Each resident has:
//! - Identity and location (room, wing) from the directory service
//! - Mobility status driving triage tier (immutable during a session)
//! - Medical priority driving hospital routing
//! - Evacuation lifecycle status (Pending, InProgress, Completed)
//! - At most one assigned responder at a time
//!
//! # Critical Invariants
//!
//! 1. `evacuation_status` only advances Pending → InProgress → Completed;
//!    it never regresses within a session
//! 2. A responder is bound on the transition into InProgress and unbound
//!    on completion or release; Pending residents are never bound
//!
//! Transition guards live in the `tracker` module, which owns the
//! per-resident state machine. Mutators here are crate-private.

use serde::{Deserialize, Serialize};

/// Mobility classification, set by the directory service.
///
/// Immutable for the duration of a session. Triage tiers are derived from
/// this field exactly once, at Active-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobilityStatus {
    /// Cannot move unaided; evacuated first regardless of medical priority
    Bedridden,

    /// Requires wheelchair assistance
    Wheelchair,

    /// Self-evacuating; lowest responder demand
    Ambulatory,
}

/// Medical priority tier, used for hospital destination routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicalPriority {
    /// Requires a facility equipped for critical cases
    Critical,

    /// Routed to the general/stable-case facility
    Stable,
}

/// Per-resident evacuation lifecycle stage.
///
/// Advances Pending → InProgress → Completed. The Pending → Completed
/// shortcut exists for self-evacuating residents with no responder bound.
/// There is no transition out of Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvacuationStatus {
    /// Not yet evacuated, no responder working on this resident
    Pending,

    /// A responder is (or was) working on this resident
    InProgress,

    /// Evacuation finished; terminal
    Completed,
}

/// A facility resident in the session's roster snapshot.
///
/// # Example
/// ```
/// use crisis_coordination_core::{MedicalPriority, MobilityStatus, Resident};
///
/// let resident = Resident::new(
///     "r1".to_string(),
///     "Abdullah Al-Malki".to_string(),
///     "101".to_string(),
///     "East Wing".to_string(),
///     MobilityStatus::Bedridden,
///     MedicalPriority::Critical,
/// );
/// assert!(resident.assigned_responder().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Stable identifier from the directory service
    id: String,

    /// Display name
    name: String,

    /// Room number within the wing
    room: String,

    /// Wing name; also the location key for responder matching
    wing: String,

    /// Mobility classification (immutable during a session)
    mobility: MobilityStatus,

    /// Medical priority for hospital routing
    medical_priority: MedicalPriority,

    /// Weak reference to the responder currently working this resident
    assigned_responder: Option<String>,

    /// Evacuation lifecycle status
    evacuation_status: EvacuationStatus,
}

impl Resident {
    /// Create a new resident in the Pending state with no responder bound.
    pub fn new(
        id: String,
        name: String,
        room: String,
        wing: String,
        mobility: MobilityStatus,
        medical_priority: MedicalPriority,
    ) -> Self {
        Self {
            id,
            name,
            room,
            wing,
            mobility,
            medical_priority,
            assigned_responder: None,
            evacuation_status: EvacuationStatus::Pending,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn wing(&self) -> &str {
        &self.wing
    }

    pub fn mobility(&self) -> MobilityStatus {
        self.mobility
    }

    pub fn medical_priority(&self) -> MedicalPriority {
        self.medical_priority
    }

    pub fn assigned_responder(&self) -> Option<&str> {
        self.assigned_responder.as_deref()
    }

    pub fn evacuation_status(&self) -> EvacuationStatus {
        self.evacuation_status
    }

    /// Location descriptor used as a responder task label ("East Wing, room 101").
    pub fn location(&self) -> String {
        format!("{}, room {}", self.wing, self.room)
    }

    /// Resident is InProgress with no responder bound — a task was released
    /// mid-evacuation and nobody has picked it up. Surfaced as an anomaly,
    /// never silently reset to Pending.
    pub fn is_abandoned(&self) -> bool {
        self.evacuation_status == EvacuationStatus::InProgress && self.assigned_responder.is_none()
    }

    // ------------------------------------------------------------------
    // Crate-private mutators (tracker owns the guards)
    // ------------------------------------------------------------------

    pub(crate) fn bind_responder(&mut self, responder_id: String) {
        debug_assert!(self.assigned_responder.is_none());
        self.assigned_responder = Some(responder_id);
        self.evacuation_status = EvacuationStatus::InProgress;
    }

    pub(crate) fn unbind_responder(&mut self) -> Option<String> {
        self.assigned_responder.take()
    }

    pub(crate) fn set_completed(&mut self) {
        self.evacuation_status = EvacuationStatus::Completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident() -> Resident {
        Resident::new(
            "r1".to_string(),
            "Abdullah Al-Malki".to_string(),
            "101".to_string(),
            "East Wing".to_string(),
            MobilityStatus::Bedridden,
            MedicalPriority::Critical,
        )
    }

    #[test]
    fn test_new_resident_is_pending_and_unassigned() {
        let r = resident();
        assert_eq!(r.evacuation_status(), EvacuationStatus::Pending);
        assert!(r.assigned_responder().is_none());
        assert!(!r.is_abandoned());
    }

    #[test]
    fn test_bind_moves_to_in_progress() {
        let mut r = resident();
        r.bind_responder("s1".to_string());
        assert_eq!(r.evacuation_status(), EvacuationStatus::InProgress);
        assert_eq!(r.assigned_responder(), Some("s1"));
    }

    #[test]
    fn test_unbind_leaves_status_in_progress() {
        let mut r = resident();
        r.bind_responder("s1".to_string());
        let released = r.unbind_responder();
        assert_eq!(released.as_deref(), Some("s1"));
        assert_eq!(r.evacuation_status(), EvacuationStatus::InProgress);
        assert!(r.is_abandoned());
    }

    #[test]
    fn test_location_descriptor() {
        assert_eq!(resident().location(), "East Wing, room 101");
    }
}
