//! Hospital destination reference data
//!
//! Static routing data: which external facility receives which medical
//! priority tier. Never mutated by a session. Phone numbers are opaque
//! strings passed through to the caller; the engine never dials.

use crate::models::resident::MedicalPriority;
use serde::{Deserialize, Serialize};

/// An external facility configured as an evacuation destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalDestination {
    /// Facility name
    pub name: String,

    /// Medical priority tier this facility receives
    pub tier: MedicalPriority,

    /// Contact number (opaque; telephony is the caller's concern)
    pub phone: String,

    /// Estimated transfer time in minutes (static, not live data)
    pub eta_minutes: u32,
}

impl HospitalDestination {
    pub fn new(name: String, tier: MedicalPriority, phone: String, eta_minutes: u32) -> Self {
        Self {
            name,
            tier,
            phone,
            eta_minutes,
        }
    }
}
