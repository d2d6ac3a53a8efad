//! Job board core
//!
//! Validated entity services, skill and benefit relationships, search
//! filters and signed-token authentication for a job board.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Entities and owner capabilities
//! - **validation**: Ordered validation pipelines
//! - **search**: Job post filter builder
//! - **services**: Application use cases
//! - **infra**: Persistence gateways, notifier, clock
//! - **api**: Token verification middleware
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Issue a token
//! cargo run -- token issue --email jon@calhoun.io
//!
//! # Search job posts
//! cargo run -- jobs list --q golang
//!
//! # List locations
//! cargo run -- catalog locations
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod search;
pub mod services;
pub mod validation;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CompanyBenefit, CompanyProfile, JobPost, Password, Skill, User};
pub use errors::{AppError, AppResult, ValidationError};
pub use search::JobPostFilter;
pub use services::{ServiceContainer, Services};
