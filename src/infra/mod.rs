//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - The in-memory gateway
//! - Notification delivery
//! - Time

pub mod clock;
pub mod db;
pub mod memory;
pub mod notifier;
pub mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use db::Database;
pub use memory::MemoryStore;
pub use notifier::{LogNotifier, Notifier, RecordingNotifier, SentNotification, TemplateKind};
pub use repositories::Repositories;

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotifier;
