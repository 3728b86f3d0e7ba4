//! Hospital destination routing
//!
//! Deterministic lookup from a resident's medical-priority tier to the
//! external facility configured to receive that tier. Pure reference
//! data: no capacity tracking, no live ETA, nothing mutated by the
//! session. A tier with no configured destination is an explicit error —
//! the router never guesses or falls back.

use crate::models::hospital::HospitalDestination;
use crate::models::resident::MedicalPriority;
use thiserror::Error;

/// Routing failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RoutingError {
    #[error("no hospital destination configured for {tier:?} tier")]
    NoDestinationConfigured { tier: MedicalPriority },
}

/// Static tier → facility lookup table.
///
/// # Example
/// ```
/// use crisis_coordination_core::{HospitalDestination, HospitalRouter, MedicalPriority};
///
/// let router = HospitalRouter::new(vec![HospitalDestination::new(
///     "King Fahd Hospital".to_string(),
///     MedicalPriority::Critical,
///     "177222222".to_string(),
///     10,
/// )]);
///
/// let dest = router.route_for(MedicalPriority::Critical).unwrap();
/// assert_eq!(dest.name, "King Fahd Hospital");
/// assert!(router.route_for(MedicalPriority::Stable).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HospitalRouter {
    destinations: Vec<HospitalDestination>,
}

impl HospitalRouter {
    pub fn new(destinations: Vec<HospitalDestination>) -> Self {
        Self { destinations }
    }

    /// Destination facility for a medical-priority tier.
    ///
    /// First match wins when multiple facilities carry the same tier,
    /// so the configured order is the preference order.
    pub fn route_for(&self, tier: MedicalPriority) -> Result<&HospitalDestination, RoutingError> {
        self.destinations
            .iter()
            .find(|d| d.tier == tier)
            .ok_or(RoutingError::NoDestinationConfigured { tier })
    }

    /// All configured destinations, in preference order.
    pub fn destinations(&self) -> &[HospitalDestination] {
        &self.destinations
    }
}
