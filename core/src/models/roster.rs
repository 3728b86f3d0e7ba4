//! Roster snapshot
//!
//! The immutable-per-session view of residents and responders, captured
//! once at Active-entry (copy-on-activate). Directory changes made during
//! a session never retroactively alter a captured roster.
//!
//! # Critical Invariants
//!
//! 1. **Identifier Uniqueness**: Each resident and responder id appears
//!    exactly once
//! 2. **Stable Ordering**: Insertion order of residents and responders is
//!    preserved; triage lists and assignment scans depend on it
//! 3. **Binding Integrity**: Every `assigned_responder` reference points
//!    at a responder present in the roster

use crate::models::resident::Resident;
use crate::models::responder::{Responder, ResponderStatus};
use std::collections::HashMap;

/// The session-owned snapshot of residents and responders.
///
/// # Example
///
/// ```rust
/// use crisis_coordination_core::{
///     MedicalPriority, MobilityStatus, Resident, Responder, Roster,
/// };
///
/// let roster = Roster::new(
///     vec![Resident::new(
///         "r1".to_string(),
///         "Fatima Al-Ghamdi".to_string(),
///         "102".to_string(),
///         "East Wing".to_string(),
///         MobilityStatus::Bedridden,
///         MedicalPriority::Critical,
///     )],
///     vec![Responder::new(
///         "s1".to_string(),
///         "Ahmed Al-Shehri".to_string(),
///         "Nurse".to_string(),
///         "East Wing".to_string(),
///     )],
/// );
/// assert_eq!(roster.num_residents(), 1);
/// assert_eq!(roster.num_responders(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// All residents, indexed by id
    residents: HashMap<String, Resident>,

    /// Resident ids in directory order (triage-stable)
    resident_order: Vec<String>,

    /// All responders, indexed by id
    responders: HashMap<String, Responder>,

    /// Responder ids in directory order (deterministic assignment scans)
    responder_order: Vec<String>,
}

impl Roster {
    /// Build a roster from directory lists.
    ///
    /// # Panics
    ///
    /// Panics on duplicate resident or responder ids — a corrupt
    /// directory extract, not a runtime condition.
    pub fn new(residents: Vec<Resident>, responders: Vec<Responder>) -> Self {
        let mut roster = Roster::default();
        for resident in residents {
            let id = resident.id().to_string();
            assert!(
                roster.residents.insert(id.clone(), resident).is_none(),
                "duplicate resident id {}",
                id
            );
            roster.resident_order.push(id);
        }
        for responder in responders {
            let id = responder.id().to_string();
            assert!(
                roster.responders.insert(id.clone(), responder).is_none(),
                "duplicate responder id {}",
                id
            );
            roster.responder_order.push(id);
        }
        roster
    }

    pub fn get_resident(&self, id: &str) -> Option<&Resident> {
        self.residents.get(id)
    }

    pub(crate) fn get_resident_mut(&mut self, id: &str) -> Option<&mut Resident> {
        self.residents.get_mut(id)
    }

    pub fn get_responder(&self, id: &str) -> Option<&Responder> {
        self.responders.get(id)
    }

    pub(crate) fn get_responder_mut(&mut self, id: &str) -> Option<&mut Responder> {
        self.responders.get_mut(id)
    }

    /// Residents in directory order.
    pub fn residents_in_order(&self) -> impl Iterator<Item = &Resident> {
        self.resident_order
            .iter()
            .filter_map(|id| self.residents.get(id))
    }

    /// Responders in directory order.
    pub fn responders_in_order(&self) -> impl Iterator<Item = &Responder> {
        self.responder_order
            .iter()
            .filter_map(|id| self.responders.get(id))
    }

    pub fn num_residents(&self) -> usize {
        self.residents.len()
    }

    pub fn num_responders(&self) -> usize {
        self.responders.len()
    }

    /// Number of responders currently working an assignment.
    pub fn num_busy_responders(&self) -> usize {
        self.responders
            .values()
            .filter(|s| s.status() == ResponderStatus::Busy)
            .count()
    }

    /// Resident currently bound to the given responder, if any.
    pub fn resident_assigned_to(&self, responder_id: &str) -> Option<&Resident> {
        self.residents_in_order()
            .find(|r| r.assigned_responder() == Some(responder_id))
    }
}

/// Source of the roster snapshot — the seam to the external directory
/// service. Pulled exactly once per session, on the transition into
/// Active.
pub trait RosterSource {
    fn fetch(&self) -> Roster;
}

/// Fixed in-memory roster source, for tests, drills, and hosts that
/// assemble the roster themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticRoster {
    residents: Vec<Resident>,
    responders: Vec<Responder>,
}

impl StaticRoster {
    pub fn new(residents: Vec<Resident>, responders: Vec<Responder>) -> Self {
        Self {
            residents,
            responders,
        }
    }
}

impl RosterSource for StaticRoster {
    fn fetch(&self) -> Roster {
        Roster::new(self.residents.clone(), self.responders.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resident::{MedicalPriority, MobilityStatus};

    fn resident(id: &str, wing: &str) -> Resident {
        Resident::new(
            id.to_string(),
            format!("Resident {}", id),
            "101".to_string(),
            wing.to_string(),
            MobilityStatus::Wheelchair,
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
    fn test_new_roster() {
        let roster = Roster::new(
            vec![resident("r1", "East Wing"), resident("r2", "West Wing")],
            vec![responder("s1", "East Wing")],
        );
        assert_eq!(roster.num_residents(), 2);
        assert_eq!(roster.num_responders(), 1);
        assert_eq!(roster.num_busy_responders(), 0);
    }

    #[test]
    fn test_order_is_preserved() {
        let roster = Roster::new(
            vec![
                resident("r3", "East Wing"),
                resident("r1", "East Wing"),
                resident("r2", "West Wing"),
            ],
            vec![],
        );
        let ids: Vec<&str> = roster.residents_in_order().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["r3", "r1", "r2"]);
    }

    #[test]
    #[should_panic(expected = "duplicate resident id")]
    fn test_duplicate_resident_id_panics() {
        Roster::new(
            vec![resident("r1", "East Wing"), resident("r1", "West Wing")],
            vec![],
        );
    }

    #[test]
    fn test_static_roster_fetch_is_repeatable() {
        let source = StaticRoster::new(vec![resident("r1", "East Wing")], vec![]);
        let a = source.fetch();
        let b = source.fetch();
        assert_eq!(a.num_residents(), b.num_residents());
    }
}
