//! Location-first assignment strategy
//!
//! Prefers a responder already located in the resident's wing — the
//! original deployment promised "automatic task distribution by
//! location", and a same-wing responder reaches the room fastest. Falls
//! back to the first available responder anywhere when the wing has
//! nobody free.

use super::{first_available, AssignmentStrategy};
use crate::models::resident::Resident;
use crate::models::responder::Responder;
use crate::models::roster::Roster;

/// Prefer same-wing responders, fall back to anyone available.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationFirst;

impl LocationFirst {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentStrategy for LocationFirst {
    fn select_responder<'a>(
        &self,
        resident: &Resident,
        roster: &'a Roster,
    ) -> Option<&'a Responder> {
        first_available(roster, Some(resident.wing()))
            .or_else(|| first_available(roster, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resident::{MedicalPriority, MobilityStatus};

    fn resident(wing: &str) -> Resident {
        Resident::new(
            "r1".to_string(),
            "Resident".to_string(),
            "101".to_string(),
            wing.to_string(),
            MobilityStatus::Bedridden,
            MedicalPriority::Critical,
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
    fn test_prefers_same_wing() {
        let roster = Roster::new(
            vec![],
            vec![responder("s1", "West Wing"), responder("s2", "East Wing")],
        );
        let pick = LocationFirst.select_responder(&resident("East Wing"), &roster);
        assert_eq!(pick.map(|s| s.id()), Some("s2"));
    }

    #[test]
    fn test_falls_back_to_any_available() {
        let roster = Roster::new(vec![], vec![responder("s1", "West Wing")]);
        let pick = LocationFirst.select_responder(&resident("East Wing"), &roster);
        assert_eq!(pick.map(|s| s.id()), Some("s1"));
    }

    #[test]
    fn test_none_when_everyone_busy() {
        let mut roster = Roster::new(
            vec![resident("East Wing")],
            vec![responder("s1", "East Wing")],
        );
        crate::tracker::mark_in_progress(&mut roster, "r1", "s1").unwrap();
        let other = resident("East Wing");
        assert!(LocationFirst.select_responder(&other, &roster).is_none());
    }
}
