//! Session event log
//!
//! Every significant state change during a crisis session is recorded as a
//! `SessionEvent`. The log serves three purposes:
//! - Notification seam: the host drains it to drive sirens, radios, and
//!   UI updates (the engine never touches hardware)
//! - Audit: reconstruct what happened and in what order
//! - Replay: the journal re-applies mutating events to rebuild session
//!   state after a coordinator restart
//!
//! Events are appended in the order operations are applied, which under
//! the session-wide writer discipline is a total order.

use serde::{Deserialize, Serialize};

/// A state change within a crisis session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Operator requested activation; abort window opened
    ActivationRequested {
        session_id: String,
        countdown_ticks: u32,
    },

    /// One countdown tick elapsed
    CountdownTick { remaining: u32 },

    /// Operator aborted during the countdown window
    CountdownAborted,

    /// Countdown reached zero; roster captured and triage published
    Activated {
        resident_count: usize,
        responder_count: usize,
    },

    /// A responder took on a resident's evacuation
    EvacuationStarted {
        resident_id: String,
        responder_id: String,
        task: String,
    },

    /// A resident's evacuation finished
    EvacuationCompleted {
        resident_id: String,
        released_responder: Option<String>,
    },

    /// A responder was freed without completing the evacuation;
    /// the resident stays InProgress as an abandoned task
    ResponderReleased {
        responder_id: String,
        resident_id: Option<String>,
    },

    /// A responder went unreachable mid-session
    ResponderWentOffline {
        responder_id: String,
        resident_id: Option<String>,
    },

    /// A procedural checklist item was flipped
    ChecklistToggled { item_id: String, completed: bool },

    /// Operator confirmed deactivation; session terminated
    Deactivated,
}

impl SessionEvent {
    /// Short description of the event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::ActivationRequested { .. } => "ActivationRequested",
            SessionEvent::CountdownTick { .. } => "CountdownTick",
            SessionEvent::CountdownAborted => "CountdownAborted",
            SessionEvent::Activated { .. } => "Activated",
            SessionEvent::EvacuationStarted { .. } => "EvacuationStarted",
            SessionEvent::EvacuationCompleted { .. } => "EvacuationCompleted",
            SessionEvent::ResponderReleased { .. } => "ResponderReleased",
            SessionEvent::ResponderWentOffline { .. } => "ResponderWentOffline",
            SessionEvent::ChecklistToggled { .. } => "ChecklistToggled",
            SessionEvent::Deactivated => "Deactivated",
        }
    }

    /// Resident id if the event concerns a specific resident.
    pub fn resident_id(&self) -> Option<&str> {
        match self {
            SessionEvent::EvacuationStarted { resident_id, .. } => Some(resident_id),
            SessionEvent::EvacuationCompleted { resident_id, .. } => Some(resident_id),
            SessionEvent::ResponderReleased { resident_id, .. } => resident_id.as_deref(),
            SessionEvent::ResponderWentOffline { resident_id, .. } => resident_id.as_deref(),
            _ => None,
        }
    }

    /// Responder id if the event concerns a specific responder.
    pub fn responder_id(&self) -> Option<&str> {
        match self {
            SessionEvent::EvacuationStarted { responder_id, .. } => Some(responder_id),
            SessionEvent::EvacuationCompleted {
                released_responder, ..
            } => released_responder.as_deref(),
            SessionEvent::ResponderReleased { responder_id, .. } => Some(responder_id),
            SessionEvent::ResponderWentOffline { responder_id, .. } => Some(responder_id),
            _ => None,
        }
    }
}

/// Append-only store of session events with convenience queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event to the log.
    pub fn log(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<&SessionEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Events concerning a specific resident.
    pub fn events_for_resident(&self, resident_id: &str) -> Vec<&SessionEvent> {
        self.events
            .iter()
            .filter(|e| e.resident_id() == Some(resident_id))
            .collect()
    }

    /// Events concerning a specific responder.
    pub fn events_for_responder(&self, responder_id: &str) -> Vec<&SessionEvent> {
        self.events
            .iter()
            .filter(|e| e.responder_id() == Some(responder_id))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = SessionEvent::CountdownTick { remaining: 2 };
        assert_eq!(event.event_type(), "CountdownTick");
    }

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        log.log(SessionEvent::EvacuationStarted {
            resident_id: "r1".to_string(),
            responder_id: "s1".to_string(),
            task: "East Wing, room 101".to_string(),
        });
        log.log(SessionEvent::EvacuationCompleted {
            resident_id: "r1".to_string(),
            released_responder: Some("s1".to_string()),
        });
        log.log(SessionEvent::ChecklistToggled {
            item_id: "gas".to_string(),
            completed: true,
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_for_resident("r1").len(), 2);
        assert_eq!(log.events_for_responder("s1").len(), 2);
        assert_eq!(log.events_of_type("ChecklistToggled").len(), 1);
    }

    #[test]
    fn test_event_log_clear() {
        let mut log = EventLog::new();
        log.log(SessionEvent::Deactivated);
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }
}
