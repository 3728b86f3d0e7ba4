//! Coordination engine
//!
//! The facade owning a crisis session and wiring every component:
//!
//! ```text
//! activate():      Idle → Countdown (abort window opens)
//! tick() × N:      Countdown → Active (roster captured, triage published)
//! assign/complete/release/toggle:  responder actions while Active
//! deactivate(confirmed): Active → Terminated (session over)
//! ```
//!
//! On the transition into Active the engine pulls the roster snapshot
//! from its `RosterSource` exactly once and runs the triage classifier
//! exactly once; both are owned by the session from then on. All
//! mutating operations are short, non-blocking critical sections with no
//! I/O — the `shared` module wraps the engine for concurrent responder
//! clients.
//!
//! # Failure semantics
//!
//! Every rejected operation is an immediate, synchronous error that
//! leaves all state untouched. The session has no "crashed" state.

use crate::allocator::{self, Assignment, AssignmentStrategy, FirstAvailable, LocationFirst};
use crate::checklist::{ChecklistError, ChecklistManager};
use crate::coordinator::journal::{JournalError, SessionJournal};
use crate::coordinator::lifecycle::{Lifecycle, SessionError, SessionPhase};
use crate::core::countdown::{CountdownStep, DEFAULT_COUNTDOWN_TICKS};
use crate::models::checklist::ChecklistItem;
use crate::models::event::{EventLog, SessionEvent};
use crate::models::hospital::HospitalDestination;
use crate::models::resident::{MedicalPriority, Resident};
use crate::models::responder::Responder;
use crate::models::roster::{Roster, RosterSource};
use crate::routing::{HospitalRouter, RoutingError};
use crate::tracker::{self, ProgressSummary, TrackerError};
use crate::triage::{classify, TriagePartition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Abort window length in discrete ticks (reference behavior: 3)
    pub countdown_ticks: u32,

    /// Hospital destinations in preference order
    pub hospitals: Vec<HospitalDestination>,

    /// Procedural checklist for the session
    pub checklist: Vec<ChecklistItem>,

    /// Automatic task-distribution strategy
    pub strategy: StrategyConfig,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            hospitals: Vec::new(),
            checklist: ChecklistManager::default_items(),
            strategy: StrategyConfig::LocationFirst,
        }
    }
}

/// Strategy selection for automatic assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyConfig {
    /// Prefer same-wing responders (default)
    LocationFirst,

    /// First available responder in roster order (baseline)
    FirstAvailable,
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("countdown ticks must be positive")]
    ZeroCountdown,

    #[error("duplicate checklist item id: {0}")]
    DuplicateChecklistItem(String),

    #[error("duplicate hospital destination name: {0}")]
    DuplicateHospital(String),
}

/// Any failure an engine operation can surface to a responder client.
///
/// All variants are local, synchronous, and recoverable; none are fatal
/// to the session.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordinationError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Checklist(#[from] ChecklistError),
}

// ============================================================================
// Coordinator
// ============================================================================

/// The coordination engine owning the crisis session.
///
/// # Example
///
/// ```rust
/// use crisis_coordination_core::{
///     Coordinator, CoordinatorConfig, MedicalPriority, MobilityStatus, Resident,
///     Responder, SessionPhase, StaticRoster,
/// };
///
/// let source = StaticRoster::new(
///     vec![Resident::new(
///         "r1".into(), "A".into(), "101".into(), "East Wing".into(),
///         MobilityStatus::Bedridden, MedicalPriority::Critical,
///     )],
///     vec![Responder::new(
///         "s1".into(), "N".into(), "Nurse".into(), "East Wing".into(),
///     )],
/// );
///
/// let mut engine =
///     Coordinator::new(CoordinatorConfig::default(), Box::new(source)).unwrap();
/// engine.activate().unwrap();
/// for _ in 0..3 {
///     engine.tick().unwrap();
/// }
/// assert_eq!(engine.phase(), SessionPhase::Active);
/// assert_eq!(engine.classify().unwrap().critical(), ["r1"]);
/// ```
pub struct Coordinator {
    /// Engine configuration (validated at construction)
    config: CoordinatorConfig,

    /// Seam to the external directory service
    roster_source: Box<dyn RosterSource + Send + Sync>,

    /// Current session identity; None before the first activation
    session_id: Option<Uuid>,

    /// Activation state machine
    lifecycle: Lifecycle,

    /// Copy-on-activate roster; Some from Active-entry onward
    roster: Option<Roster>,

    /// Triage partition, fixed at Active-entry
    triage: Option<TriagePartition>,

    /// Procedural checklist state
    checklist: ChecklistManager,

    /// Static hospital routing table
    router: HospitalRouter,

    /// Automatic assignment strategy
    strategy: Box<dyn AssignmentStrategy + Send + Sync>,

    /// Session event log (notification seam and journal source)
    event_log: EventLog,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// Create an engine from a validated configuration and a directory
    /// seam.
    pub fn new(
        config: CoordinatorConfig,
        roster_source: Box<dyn RosterSource + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        Self::validate_config(&config)?;

        let strategy: Box<dyn AssignmentStrategy + Send + Sync> = match config.strategy {
            StrategyConfig::LocationFirst => Box::new(LocationFirst::new()),
            StrategyConfig::FirstAvailable => Box::new(FirstAvailable::new()),
        };

        Ok(Self {
            router: HospitalRouter::new(config.hospitals.clone()),
            checklist: ChecklistManager::new(config.checklist.clone()),
            strategy,
            config,
            roster_source,
            session_id: None,
            lifecycle: Lifecycle::new(),
            roster: None,
            triage: None,
            event_log: EventLog::new(),
        })
    }

    fn validate_config(config: &CoordinatorConfig) -> Result<(), ConfigError> {
        if config.countdown_ticks == 0 {
            return Err(ConfigError::ZeroCountdown);
        }

        let mut item_ids = HashSet::new();
        for item in &config.checklist {
            if !item_ids.insert(item.id()) {
                return Err(ConfigError::DuplicateChecklistItem(item.id().to_string()));
            }
        }

        let mut hospital_names = HashSet::new();
        for hospital in &config.hospitals {
            if !hospital_names.insert(hospital.name.as_str()) {
                return Err(ConfigError::DuplicateHospital(hospital.name.clone()));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Request activation: open the abort window for a new session.
    ///
    /// Valid from Idle, or from Terminated (a new session replaces the
    /// finished one). Fails with `InvalidTransition` from Countdown and
    /// Active.
    pub fn activate(&mut self) -> Result<(), SessionError> {
        match self.lifecycle.phase() {
            SessionPhase::Idle => {}
            SessionPhase::Terminated => {
                // Previous session is discarded; start fresh.
                self.lifecycle = Lifecycle::new();
            }
            from @ (SessionPhase::Countdown | SessionPhase::Active) => {
                return Err(SessionError::InvalidTransition {
                    from,
                    action: "activate",
                });
            }
        }

        self.roster = None;
        self.triage = None;
        self.checklist.reset();
        self.event_log.clear();

        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.lifecycle.request_activation(self.config.countdown_ticks)?;
        self.event_log.log(SessionEvent::ActivationRequested {
            session_id: session_id.to_string(),
            countdown_ticks: self.config.countdown_ticks,
        });
        Ok(())
    }

    /// Advance the countdown by one tick (driven by the host's single
    /// authoritative timer). On the final tick the session goes Active:
    /// the roster snapshot is captured and triage runs, once.
    pub fn tick(&mut self) -> Result<CountdownStep, SessionError> {
        let step = self.lifecycle.tick()?;
        match step {
            CountdownStep::Ticking { remaining } => {
                self.event_log.log(SessionEvent::CountdownTick { remaining });
            }
            CountdownStep::Elapsed => {
                let roster = self.roster_source.fetch();
                let triage = classify(&roster);
                self.event_log.log(SessionEvent::Activated {
                    resident_count: roster.num_residents(),
                    responder_count: roster.num_responders(),
                });
                self.roster = Some(roster);
                self.triage = Some(triage);
            }
        }
        Ok(step)
    }

    /// Abort inside the countdown window; the pending session is
    /// discarded and the engine returns to Idle.
    pub fn abort_countdown(&mut self) -> Result<(), SessionError> {
        self.lifecycle.abort_countdown()?;
        self.event_log.log(SessionEvent::CountdownAborted);
        self.session_id = None;
        Ok(())
    }

    /// Two-step deactivation. `confirm = false` reports back without
    /// changing state; `confirm = true` terminates the session,
    /// irreversibly. Returns whether the session terminated.
    pub fn deactivate(&mut self, confirm: bool) -> Result<bool, SessionError> {
        let terminated = self.lifecycle.deactivate(confirm)?;
        if terminated {
            self.event_log.log(SessionEvent::Deactivated);
        }
        Ok(terminated)
    }

    // ========================================================================
    // Responder operations (Active only)
    // ========================================================================

    /// Claim a resident for a responder.
    pub fn assign(
        &mut self,
        resident_id: &str,
        responder_id: &str,
    ) -> Result<(), CoordinationError> {
        let roster = self.active_roster_mut()?;
        tracker::mark_in_progress(roster, resident_id, responder_id)?;
        let task = roster
            .get_responder(responder_id)
            .and_then(|s| s.assigned_task())
            .unwrap_or_default()
            .to_string();
        self.event_log.log(SessionEvent::EvacuationStarted {
            resident_id: resident_id.to_string(),
            responder_id: responder_id.to_string(),
            task,
        });
        Ok(())
    }

    /// Distribute available responders over residents still needing
    /// help, in triage-priority order.
    pub fn auto_assign(&mut self) -> Result<Vec<Assignment>, CoordinationError> {
        let phase = self.lifecycle.phase();
        let (Some(roster), Some(triage)) = (self.roster.as_mut(), self.triage.as_ref()) else {
            return Err(SessionError::InvalidTransition {
                from: phase,
                action: "auto-assign",
            }
            .into());
        };
        if phase != SessionPhase::Active {
            return Err(SessionError::InvalidTransition {
                from: phase,
                action: "auto-assign",
            }
            .into());
        }

        let applied = allocator::auto_assign(roster, triage, self.strategy.as_ref());
        for assignment in &applied {
            self.event_log.log(SessionEvent::EvacuationStarted {
                resident_id: assignment.resident_id.clone(),
                responder_id: assignment.responder_id.clone(),
                task: assignment.task.clone(),
            });
        }
        Ok(applied)
    }

    /// Complete a resident's evacuation, freeing the bound responder.
    pub fn complete(&mut self, resident_id: &str) -> Result<(), CoordinationError> {
        let roster = self.active_roster_mut()?;
        let released = tracker::mark_completed(roster, resident_id)?;
        self.event_log.log(SessionEvent::EvacuationCompleted {
            resident_id: resident_id.to_string(),
            released_responder: released,
        });
        Ok(())
    }

    /// Free a responder mid-task; the resident surfaces as abandoned.
    pub fn release(&mut self, responder_id: &str) -> Result<(), CoordinationError> {
        let roster = self.active_roster_mut()?;
        let resident_id = allocator::release(roster, responder_id)?;
        self.event_log.log(SessionEvent::ResponderReleased {
            responder_id: responder_id.to_string(),
            resident_id,
        });
        Ok(())
    }

    /// Release a responder and mark it unreachable for the session.
    pub fn mark_responder_offline(&mut self, responder_id: &str) -> Result<(), CoordinationError> {
        let roster = self.active_roster_mut()?;
        let resident_id = allocator::mark_offline(roster, responder_id)?;
        self.event_log.log(SessionEvent::ResponderWentOffline {
            responder_id: responder_id.to_string(),
            resident_id,
        });
        Ok(())
    }

    /// Flip a procedural checklist item.
    pub fn toggle_checklist(&mut self, item_id: &str) -> Result<bool, CoordinationError> {
        if self.lifecycle.phase() != SessionPhase::Active {
            return Err(SessionError::InvalidTransition {
                from: self.lifecycle.phase(),
                action: "toggle the checklist",
            }
            .into());
        }
        let completed = self.checklist.toggle(item_id)?;
        self.event_log.log(SessionEvent::ChecklistToggled {
            item_id: item_id.to_string(),
            completed,
        });
        Ok(completed)
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// The triage partition published at Active-entry. Stable for the
    /// whole session; valid once the session has gone Active.
    pub fn classify(&self) -> Result<&TriagePartition, SessionError> {
        self.triage.as_ref().ok_or(SessionError::InvalidTransition {
            from: self.lifecycle.phase(),
            action: "classify",
        })
    }

    /// Destination facility for a medical-priority tier. Reference data;
    /// readable in any phase.
    pub fn route_for(&self, tier: MedicalPriority) -> Result<&HospitalDestination, RoutingError> {
        self.router.route_for(tier)
    }

    /// Session-wide completion gauge, computed on every call.
    pub fn progress(&self) -> Result<ProgressSummary, SessionError> {
        self.roster
            .as_ref()
            .map(tracker::progress_summary)
            .ok_or(SessionError::InvalidTransition {
                from: self.lifecycle.phase(),
                action: "summarize progress",
            })
    }

    /// Residents whose task was released mid-evacuation and needs a new
    /// responder.
    pub fn abandoned(&self) -> Vec<String> {
        self.roster
            .as_ref()
            .map(tracker::abandoned_residents)
            .unwrap_or_default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.lifecycle.phase()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.lifecycle.countdown_remaining()
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    pub fn checklist(&self) -> &ChecklistManager {
        &self.checklist
    }

    pub fn events(&self) -> &EventLog {
        &self.event_log
    }

    /// Full session view for UI rendering and tests.
    pub fn snapshot(&self) -> SessionSnapshot {
        let (residents, responders) = match &self.roster {
            Some(roster) => (
                roster.residents_in_order().cloned().collect(),
                roster.responders_in_order().cloned().collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        SessionSnapshot {
            session_id: self.session_id.map(|id| id.to_string()),
            phase: self.lifecycle.phase(),
            countdown_remaining: self.lifecycle.countdown_remaining(),
            activated_at: self.lifecycle.activated_at(),
            deactivated_at: self.lifecycle.deactivated_at(),
            residents,
            responders,
            triage: self.triage.clone(),
            progress: self.roster.as_ref().map(tracker::progress_summary),
            abandoned: self.abandoned(),
            checklist: self.checklist.items().to_vec(),
            events_logged: self.event_log.len(),
        }
    }

    /// Durable record of the session: roster hash plus the full event
    /// log, replayable after a coordinator restart.
    pub fn journal(&self) -> Result<SessionJournal, JournalError> {
        let session_id = self
            .session_id
            .map(|id| id.to_string())
            .ok_or_else(|| JournalError::NoSession)?;
        let roster = self.roster.as_ref().ok_or(JournalError::NoSession)?;
        SessionJournal::capture(&session_id, roster, &self.event_log)
    }

    fn active_roster_mut(&mut self) -> Result<&mut Roster, SessionError> {
        let from = self.lifecycle.phase();
        if from != SessionPhase::Active {
            return Err(SessionError::InvalidTransition {
                from,
                action: "mutate session state",
            });
        }
        self.roster.as_mut().ok_or(SessionError::InvalidTransition {
            from,
            action: "mutate session state",
        })
    }
}

/// Point-in-time view of the session, safe to hand to any reader.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Option<String>,
    pub phase: SessionPhase,
    pub countdown_remaining: Option<u32>,
    pub activated_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
    pub residents: Vec<Resident>,
    pub responders: Vec<Responder>,
    pub triage: Option<TriagePartition>,
    pub progress: Option<ProgressSummary>,
    pub abandoned: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
    pub events_logged: usize,
}
