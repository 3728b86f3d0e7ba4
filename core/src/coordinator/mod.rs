//! Session coordination: lifecycle state machine, engine facade, and
//! the durable journal.

pub mod engine;
pub mod journal;
pub mod lifecycle;

pub use engine::{
    ConfigError, CoordinationError, Coordinator, CoordinatorConfig, SessionSnapshot,
    StrategyConfig,
};
pub use journal::{JournalError, ReplayedSession, SessionJournal};
pub use lifecycle::{Lifecycle, SessionError, SessionPhase};
