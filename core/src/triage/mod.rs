//! Triage classification
//!
//! Partitions the roster into three evacuation-priority lists by mobility
//! status alone: Bedridden residents evacuate first regardless of medical
//! priority, Wheelchair residents second, Ambulatory residents
//! self-evacuate last.
//!
//! # Ordering Guarantee
//!
//! Within a tier, roster (directory) order is preserved and the partition
//! is fixed at classification time. A resident's list position never
//! changes for the life of the session, no matter how its evacuation
//! status moves — responders coordinating over radio rely on "third name
//! on the red list" staying the third name.
//!
//! `classify` is a pure function and runs exactly once per session, at
//! Active-entry. The coordinator stores and republishes its result.

use crate::models::resident::{MobilityStatus, Resident};
use crate::models::roster::Roster;
use serde::{Deserialize, Serialize};

/// Evacuation-priority tier derived from mobility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriageTier {
    /// Bedridden — evacuate first
    Critical,

    /// Wheelchair — evacuate second
    Urgent,

    /// Ambulatory — self-evacuating
    Mobile,
}

impl TriageTier {
    /// The fixed mobility → tier mapping.
    pub fn from_mobility(mobility: MobilityStatus) -> Self {
        match mobility {
            MobilityStatus::Bedridden => TriageTier::Critical,
            MobilityStatus::Wheelchair => TriageTier::Urgent,
            MobilityStatus::Ambulatory => TriageTier::Mobile,
        }
    }
}

/// The three priority lists published at Active-entry.
///
/// Lists hold resident ids in roster order. The partition is exhaustive:
/// every resident appears in exactly one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriagePartition {
    critical: Vec<String>,
    urgent: Vec<String>,
    mobile: Vec<String>,
}

impl TriagePartition {
    /// Bedridden residents, highest priority.
    pub fn critical(&self) -> &[String] {
        &self.critical
    }

    /// Wheelchair residents.
    pub fn urgent(&self) -> &[String] {
        &self.urgent
    }

    /// Ambulatory, self-evacuating residents.
    pub fn mobile(&self) -> &[String] {
        &self.mobile
    }

    /// Tier a resident was classified into, if present.
    pub fn tier_of(&self, resident_id: &str) -> Option<TriageTier> {
        if self.critical.iter().any(|id| id == resident_id) {
            Some(TriageTier::Critical)
        } else if self.urgent.iter().any(|id| id == resident_id) {
            Some(TriageTier::Urgent)
        } else if self.mobile.iter().any(|id| id == resident_id) {
            Some(TriageTier::Mobile)
        } else {
            None
        }
    }

    /// Residents needing a responder, in evacuation-priority order
    /// (critical first, then urgent). Mobile residents self-evacuate and
    /// are excluded.
    pub fn assisted_order(&self) -> impl Iterator<Item = &str> {
        self.critical
            .iter()
            .chain(self.urgent.iter())
            .map(String::as_str)
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.urgent.len() + self.mobile.len()
    }
}

/// Partition the roster by mobility status.
///
/// Pure: same roster in, same partition out, idempotent, no side effects.
///
/// # Example
/// ```
/// use crisis_coordination_core::{
///     classify, MedicalPriority, MobilityStatus, Resident, Roster,
/// };
///
/// let roster = Roster::new(
///     vec![
///         Resident::new("r1".into(), "A".into(), "101".into(), "East Wing".into(),
///             MobilityStatus::Bedridden, MedicalPriority::Critical),
///         Resident::new("r2".into(), "B".into(), "201".into(), "North Wing".into(),
///             MobilityStatus::Wheelchair, MedicalPriority::Stable),
///         Resident::new("r3".into(), "C".into(), "301".into(), "South Wing".into(),
///             MobilityStatus::Ambulatory, MedicalPriority::Stable),
///     ],
///     vec![],
/// );
///
/// let partition = classify(&roster);
/// assert_eq!(partition.critical(), ["r1"]);
/// assert_eq!(partition.urgent(), ["r2"]);
/// assert_eq!(partition.mobile(), ["r3"]);
/// ```
pub fn classify(roster: &Roster) -> TriagePartition {
    let mut partition = TriagePartition {
        critical: Vec::new(),
        urgent: Vec::new(),
        mobile: Vec::new(),
    };

    for resident in roster.residents_in_order() {
        let list = match TriageTier::from_mobility(resident.mobility()) {
            TriageTier::Critical => &mut partition.critical,
            TriageTier::Urgent => &mut partition.urgent,
            TriageTier::Mobile => &mut partition.mobile,
        };
        list.push(resident.id().to_string());
    }

    partition
}

/// Count residents per tier without building a partition. Used by the
/// pre-activation summary screen.
pub fn tier_counts(residents: &[Resident]) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    for resident in residents {
        match TriageTier::from_mobility(resident.mobility()) {
            TriageTier::Critical => counts.0 += 1,
            TriageTier::Urgent => counts.1 += 1,
            TriageTier::Mobile => counts.2 += 1,
        }
    }
    counts
}
