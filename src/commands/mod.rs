//! Commands module - CLI command implementations.
//!
//! Each command is implemented in its own module for separation of concerns.

pub mod catalog;
pub mod jobs;
pub mod token;

use serde::Serialize;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryStore};
use crate::services::Services;

/// Build the service container for a command run.
pub async fn services(config: &Config, in_memory: bool) -> AppResult<Services> {
    if in_memory {
        tracing::debug!("Using in-memory store");
        return Services::in_memory(MemoryStore::new(), config);
    }

    let db = Database::connect(config).await?;
    Services::from_connection(db.get_connection(), config)
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to render output: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
