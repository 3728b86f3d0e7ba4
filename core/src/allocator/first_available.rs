//! First-available assignment strategy
//!
//! Baseline: the first available responder in roster order, ignoring
//! location. Useful for comparison and for facilities small enough that
//! wing distance does not matter.

use super::{first_available, AssignmentStrategy};
use crate::models::resident::Resident;
use crate::models::responder::Responder;
use crate::models::roster::Roster;

/// First available responder in roster order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl FirstAvailable {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentStrategy for FirstAvailable {
    fn select_responder<'a>(
        &self,
        _resident: &Resident,
        roster: &'a Roster,
    ) -> Option<&'a Responder> {
        first_available(roster, None)
    }
}
