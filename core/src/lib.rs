//! Crisis Coordination Core - Evacuation Engine
//!
//! Bounded-time, priority-ordered coordination protocol for facility-wide
//! emergency evacuation: classifies every resident by evacuation
//! difficulty, assigns responders, tracks completion, and routes
//! casualties to external facilities.
//!
//! # Architecture
//!
//! - **core**: Countdown time source for the activation abort window
//! - **models**: Domain types (Resident, Responder, Roster, events)
//! - **triage**: Mobility-based priority classification
//! - **tracker**: Per-resident evacuation state machine
//! - **allocator**: Responder-to-resident matching and strategies
//! - **routing**: Static hospital destination lookup
//! - **checklist**: Advisory procedural checklist
//! - **coordinator**: Session lifecycle, engine facade, durable journal
//! - **shared**: Thread-safe handle for concurrent responder clients
//!
//! # Critical Invariants
//!
//! 1. Evacuation status only advances Pending → InProgress → Completed
//! 2. A responder is Busy iff it bears a task; never double-booked
//! 3. Triage runs once per session; list positions never change
//! 4. A failed operation leaves all session state untouched

// Module declarations
pub mod allocator;
pub mod checklist;
pub mod coordinator;
pub mod core;
pub mod models;
pub mod routing;
pub mod shared;
pub mod tracker;
pub mod triage;

// Re-exports for convenience
pub use allocator::{Assignment, AssignmentStrategy, FirstAvailable, LocationFirst};
pub use checklist::{ChecklistError, ChecklistManager};
pub use coordinator::{
    ConfigError, CoordinationError, Coordinator, CoordinatorConfig, JournalError, ReplayedSession,
    SessionError, SessionJournal, SessionPhase, SessionSnapshot, StrategyConfig,
};
pub use crate::core::countdown::{CountdownStep, CountdownTimer, DEFAULT_COUNTDOWN_TICKS};
pub use models::{
    checklist::ChecklistItem,
    event::{EventLog, SessionEvent},
    hospital::HospitalDestination,
    resident::{EvacuationStatus, MedicalPriority, MobilityStatus, Resident},
    responder::{Responder, ResponderStatus},
    roster::{Roster, RosterSource, StaticRoster},
};
pub use routing::{HospitalRouter, RoutingError};
pub use shared::SharedCoordinator;
pub use tracker::{ProgressSummary, TrackerError};
pub use triage::{classify, tier_counts, TriagePartition, TriageTier};
