//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use job_board::config::Config;
use job_board::domain::JobPost;
use job_board::infra::{ManualClock, MemoryStore, RecordingNotifier, Repositories};
use job_board::services::Services;

pub const SECRET: &str = "integration-secret-key-at-least-32!!";

pub fn config() -> Config {
    Config::new("postgres://localhost/job_board_test", SECRET, "test-pepper", "test-hmac-key")
}

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()))
}

/// Services over a fresh in-memory store, with handles to its collaborators
pub struct Harness {
    pub store: MemoryStore,
    pub notifier: RecordingNotifier,
    pub clock: Arc<ManualClock>,
    pub services: Services,
}

pub fn harness() -> Harness {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::new();
    let clock = clock();

    let services = Services::from_repositories(
        Repositories::in_memory(store.clone()),
        &config(),
        Arc::new(notifier.clone()),
        clock.clone(),
    )
    .unwrap();

    Harness {
        store,
        notifier,
        clock,
        services,
    }
}

pub fn golang_post() -> JobPost {
    JobPost {
        user_id: 1,
        title: "Golang Dev Wanted".to_string(),
        location_id: 2,
        category_id: 2,
        description: "Build and ship Go services".to_string(),
        apply_at: "jobs@acme.io".to_string(),
        ..Default::default()
    }
}
