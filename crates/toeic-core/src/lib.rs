//! toeic-core: Core library for the toeic study tracker
//!
//! Provides the data model, the persisted state store, and the flashcard
//! study queue for a personal TOEIC tracker. No server - one JSON blob.

pub mod bug;
pub mod config;
pub mod deck;
pub mod error;
pub mod id;
pub mod import;
pub mod queue;
pub mod repository;
pub mod score;
pub mod seed;
pub mod state;
pub mod stats;
pub mod store;
pub mod task;
pub mod timer;

pub use bug::{BugLog, ErrorType, NewBugLog};
pub use config::Config;
pub use deck::{Card, CardStatus, Deck, NewCard};
pub use error::Error;
pub use id::generate_id;
pub use queue::{Cursor, SessionView, StudyMode, StudySession, project, reconcile_cursor};
pub use repository::{JsonFileRepository, MemoryRepository, Repository};
pub use score::{NewTestResult, TestResult};
pub use state::AppState;
pub use stats::Dashboard;
pub use store::Store;
pub use task::{Task, TaskPhase};
pub use timer::{Countdown, Section};

/// Result type for toeic operations
pub type Result<T> = std::result::Result<T, Error>;
