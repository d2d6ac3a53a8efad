//! Application state shared with request middleware.

use std::sync::Arc;

use crate::services::{ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
}

impl AppState {
    pub fn new(services: Arc<dyn ServiceContainer>) -> Self {
        Self { services }
    }
}

impl From<Services> for AppState {
    fn from(services: Services) -> Self {
        Self::new(Arc::new(services))
    }
}
