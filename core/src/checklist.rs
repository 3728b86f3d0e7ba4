//! Procedural checklist manager
//!
//! Tracks the independent emergency checklist (backup power, gas shutoff,
//! notifications) during an active session. Unlike the clinical
//! medication checklists elsewhere in the facility system, this list is
//! advisory: items carry no ordering or prerequisites, and
//! `all_completed` is informational only — it never gates any other
//! component.

use crate::models::checklist::ChecklistItem;
use thiserror::Error;

/// Checklist failures.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChecklistError {
    #[error("unknown checklist item: {0}")]
    UnknownChecklistItem(String),
}

/// Session-scoped checklist state.
#[derive(Debug, Clone, Default)]
pub struct ChecklistManager {
    items: Vec<ChecklistItem>,
}

impl ChecklistManager {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self { items }
    }

    /// The facility's standing emergency checklist.
    pub fn default_items() -> Vec<ChecklistItem> {
        vec![
            ChecklistItem::new(
                "backup-generator".to_string(),
                "Start the backup generator".to_string(),
            ),
            ChecklistItem::new(
                "gas-shutoff".to_string(),
                "Shut off the central gas supply".to_string(),
            ),
            ChecklistItem::new(
                "civil-defense".to_string(),
                "Notify civil defense".to_string(),
            ),
            ChecklistItem::new(
                "notify-families".to_string(),
                "Notify residents' families".to_string(),
            ),
        ]
    }

    /// Flip an item and return its new completed state.
    pub fn toggle(&mut self, item_id: &str) -> Result<bool, ChecklistError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .map(|item| item.toggle())
            .ok_or_else(|| ChecklistError::UnknownChecklistItem(item_id.to_string()))
    }

    /// Force an item to a known state (journal replay).
    pub(crate) fn set_completed(
        &mut self,
        item_id: &str,
        completed: bool,
    ) -> Result<(), ChecklistError> {
        self.items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .map(|item| item.set_completed(completed))
            .ok_or_else(|| ChecklistError::UnknownChecklistItem(item_id.to_string()))
    }

    /// Informational only; never blocks another component.
    pub fn all_completed(&self) -> bool {
        self.items.iter().all(|item| item.completed())
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed()).count()
    }

    /// Items in configured order.
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Reset every item to uncompleted (new session).
    pub(crate) fn reset(&mut self) {
        for item in &mut self.items {
            item.set_completed(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_and_reports() {
        let mut checklist = ChecklistManager::new(ChecklistManager::default_items());
        assert!(checklist.toggle("gas-shutoff").unwrap());
        assert!(!checklist.toggle("gas-shutoff").unwrap());
    }

    #[test]
    fn test_unknown_item() {
        let mut checklist = ChecklistManager::new(ChecklistManager::default_items());
        assert_eq!(
            checklist.toggle("sprinklers").unwrap_err(),
            ChecklistError::UnknownChecklistItem("sprinklers".to_string())
        );
    }

    #[test]
    fn test_items_are_independent() {
        let mut checklist = ChecklistManager::new(ChecklistManager::default_items());
        // Any order works; nothing is a prerequisite.
        checklist.toggle("notify-families").unwrap();
        checklist.toggle("backup-generator").unwrap();
        assert_eq!(checklist.completed_count(), 2);
        assert!(!checklist.all_completed());
    }

    #[test]
    fn test_all_completed() {
        let mut checklist = ChecklistManager::new(ChecklistManager::default_items());
        for id in ["backup-generator", "gas-shutoff", "civil-defense", "notify-families"] {
            checklist.toggle(id).unwrap();
        }
        assert!(checklist.all_completed());

        checklist.reset();
        assert_eq!(checklist.completed_count(), 0);
    }
}
