//! Checklist item model
//!
//! Procedural checklist entries (power, gas, notifications) tracked during
//! an active session. Items are independently toggled; there is no
//! ordering or prerequisite between them, and the list is advisory — it
//! never gates any other component.

use serde::{Deserialize, Serialize};

/// A single procedural checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    id: String,
    label: String,
    completed: bool,
}

impl ChecklistItem {
    /// Create a new, uncompleted item.
    pub fn new(id: String, label: String) -> Self {
        Self {
            id,
            label,
            completed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
