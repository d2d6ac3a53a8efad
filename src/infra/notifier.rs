//! Outbound user notifications (password reset links, welcome mail).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message templates a notifier knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    PasswordReset,
    Welcome,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, template: TemplateKind, payload: Value) -> AppResult<()>;
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, template: TemplateKind, payload: Value) -> AppResult<()> {
        tracing::info!(recipient, ?template, %payload, "Notification dispatched");
        Ok(())
    }
}

/// A notification captured by `RecordingNotifier`
#[derive(Debug, Clone, PartialEq)]
pub struct SentNotification {
    pub recipient: String,
    pub template: TemplateKind,
    pub payload: Value,
}

/// Keeps every notification in memory for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentNotification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> AppResult<Vec<SentNotification>> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .map_err(|_| AppError::notification("recorder lock poisoned"))
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, recipient: &str, template: TemplateKind, payload: Value) -> AppResult<()> {
        self.sent
            .lock()
            .map_err(|_| AppError::notification("recorder lock poisoned"))?
            .push(SentNotification {
                recipient: recipient.to_string(),
                template,
                payload,
            });
        Ok(())
    }
}
