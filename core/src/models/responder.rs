//! Responder model
//!
//! Represents a staff member capable of being assigned to assist a
//! resident's evacuation.
//!
//! # Critical Invariant
//!
//! `status == Busy` if and only if `assigned_task` is set. The only
//! mutators are `assign_task` and `clear_task`, which preserve this by
//! construction. A responder owns at most one active assignment.

use serde::{Deserialize, Serialize};

/// Responder availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponderStatus {
    /// Free to take an assignment
    Available,

    /// Working exactly one active assignment
    Busy,

    /// Unreachable; never considered for assignment
    Offline,
}

/// A staff member in the session's roster snapshot.
///
/// # Example
/// ```
/// use crisis_coordination_core::{Responder, ResponderStatus};
///
/// let responder = Responder::new(
///     "s1".to_string(),
///     "Ahmed Al-Shehri".to_string(),
///     "Nurse".to_string(),
///     "East Wing".to_string(),
/// );
/// assert_eq!(responder.status(), ResponderStatus::Available);
/// assert!(responder.assigned_task().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responder {
    /// Stable identifier from the directory service
    id: String,

    /// Display name
    name: String,

    /// Staff role (free text from the directory, e.g. "Nurse")
    role: String,

    /// Last known location; matched against resident wings
    current_location: String,

    /// Location descriptor of the active assignment, if any
    assigned_task: Option<String>,

    /// Availability status
    status: ResponderStatus,
}

impl Responder {
    /// Create a new responder, Available with no task.
    pub fn new(id: String, name: String, role: String, current_location: String) -> Self {
        Self {
            id,
            name,
            role,
            current_location,
            assigned_task: None,
            status: ResponderStatus::Available,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn current_location(&self) -> &str {
        &self.current_location
    }

    pub fn assigned_task(&self) -> Option<&str> {
        self.assigned_task.as_deref()
    }

    pub fn status(&self) -> ResponderStatus {
        self.status
    }

    pub fn is_available(&self) -> bool {
        self.status == ResponderStatus::Available
    }

    /// Busy ⇔ task-bearing. Checked by journal validation and tests.
    pub fn is_consistent(&self) -> bool {
        (self.status == ResponderStatus::Busy) == self.assigned_task.is_some()
    }

    // ------------------------------------------------------------------
    // Crate-private mutators (tracker/allocator own the guards)
    // ------------------------------------------------------------------

    pub(crate) fn assign_task(&mut self, task: String) {
        debug_assert!(self.status == ResponderStatus::Available);
        self.assigned_task = Some(task);
        self.status = ResponderStatus::Busy;
    }

    pub(crate) fn clear_task(&mut self) -> Option<String> {
        self.status = ResponderStatus::Available;
        self.assigned_task.take()
    }

    pub(crate) fn set_offline(&mut self) {
        debug_assert!(self.assigned_task.is_none());
        self.status = ResponderStatus::Offline;
    }
}
