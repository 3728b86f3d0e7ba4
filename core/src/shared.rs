//! Thread-safe coordinator handle
//!
//! A live emergency has many responder clients mutating one session.
//! `SharedCoordinator` applies the session-wide discipline from the
//! engine's contract: every mutating operation takes the write lock (one
//! logical writer at a time; the critical sections are short,
//! non-blocking, and free of I/O), while reads take the read lock and
//! return owned copies, so a reader always observes a fully-applied
//! state, never a partial mutation.
//!
//! Conflicting concurrent claims on the same resident or responder are
//! serialized by the lock and rejected by the tracker guards — the last
//! to acquire the lock loses with an explicit error, not a silent
//! overwrite.

use crate::allocator::Assignment;
use crate::coordinator::{
    CoordinationError, Coordinator, SessionError, SessionPhase, SessionSnapshot,
};
use crate::core::countdown::CountdownStep;
use crate::models::hospital::HospitalDestination;
use crate::models::resident::MedicalPriority;
use crate::routing::RoutingError;
use crate::tracker::ProgressSummary;
use crate::triage::TriagePartition;
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to a shared coordination engine.
#[derive(Clone)]
pub struct SharedCoordinator {
    inner: Arc<RwLock<Coordinator>>,
}

impl SharedCoordinator {
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            inner: Arc::new(RwLock::new(coordinator)),
        }
    }

    // A poisoned lock means a panicking writer; the engine never leaves
    // partial mutations behind, so the last-applied state is still good.
    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Coordinator> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Coordinator> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Mutations (write lock)
    // ------------------------------------------------------------------

    pub fn activate(&self) -> Result<(), SessionError> {
        self.write().activate()
    }

    pub fn tick(&self) -> Result<CountdownStep, SessionError> {
        self.write().tick()
    }

    pub fn abort_countdown(&self) -> Result<(), SessionError> {
        self.write().abort_countdown()
    }

    pub fn deactivate(&self, confirm: bool) -> Result<bool, SessionError> {
        self.write().deactivate(confirm)
    }

    pub fn assign(&self, resident_id: &str, responder_id: &str) -> Result<(), CoordinationError> {
        self.write().assign(resident_id, responder_id)
    }

    pub fn auto_assign(&self) -> Result<Vec<Assignment>, CoordinationError> {
        self.write().auto_assign()
    }

    pub fn complete(&self, resident_id: &str) -> Result<(), CoordinationError> {
        self.write().complete(resident_id)
    }

    pub fn release(&self, responder_id: &str) -> Result<(), CoordinationError> {
        self.write().release(responder_id)
    }

    pub fn mark_responder_offline(&self, responder_id: &str) -> Result<(), CoordinationError> {
        self.write().mark_responder_offline(responder_id)
    }

    pub fn toggle_checklist(&self, item_id: &str) -> Result<bool, CoordinationError> {
        self.write().toggle_checklist(item_id)
    }

    // ------------------------------------------------------------------
    // Reads (read lock, owned copies out)
    // ------------------------------------------------------------------

    pub fn phase(&self) -> SessionPhase {
        self.read().phase()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.read().snapshot()
    }

    pub fn progress(&self) -> Result<ProgressSummary, SessionError> {
        self.read().progress()
    }

    pub fn classify(&self) -> Result<TriagePartition, SessionError> {
        self.read().classify().cloned()
    }

    pub fn route_for(&self, tier: MedicalPriority) -> Result<HospitalDestination, RoutingError> {
        self.read().route_for(tier).cloned()
    }

    pub fn abandoned(&self) -> Vec<String> {
        self.read().abandoned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::CoordinatorConfig;
    use crate::models::resident::{MobilityStatus, Resident};
    use crate::models::responder::Responder;
    use crate::models::roster::StaticRoster;

    fn shared() -> SharedCoordinator {
        let source = StaticRoster::new(
            vec![Resident::new(
                "r1".to_string(),
                "Abdullah Al-Malki".to_string(),
                "101".to_string(),
                "East Wing".to_string(),
                MobilityStatus::Bedridden,
                MedicalPriority::Critical,
            )],
            vec![Responder::new(
                "s1".to_string(),
                "Ahmed Al-Shehri".to_string(),
                "Nurse".to_string(),
                "East Wing".to_string(),
            )],
        );
        SharedCoordinator::new(
            Coordinator::new(CoordinatorConfig::default(), Box::new(source)).unwrap(),
        )
    }

    #[test]
    fn test_handles_share_one_session() {
        let a = shared();
        let b = a.clone();

        a.activate().unwrap();
        while a.tick().unwrap() != CountdownStep::Elapsed {}

        b.assign("r1", "s1").unwrap();
        let snapshot = a.snapshot();
        assert_eq!(snapshot.phase, SessionPhase::Active);
        assert_eq!(snapshot.progress.map(|p| p.in_progress), Some(1));

        // Reads come back as owned copies through either handle.
        assert_eq!(b.classify().unwrap().critical(), ["r1"]);
        assert!(a.abandoned().is_empty());
        assert!(b.route_for(MedicalPriority::Critical).is_err()); // none configured
    }
}
