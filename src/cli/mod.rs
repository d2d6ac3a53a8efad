//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `token` - Issue and verify auth tokens
//! - `jobs` - Search and inspect job posts
//! - `catalog` - List reference data

pub mod args;

pub use args::{Cli, Commands};
