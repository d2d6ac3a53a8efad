//! API layer - HTTP-facing pieces
//!
//! Only the token verification filter and the state it needs; routing is
//! assembled by the embedding application.

pub mod middleware;
pub mod state;

pub use middleware::{auth_middleware, CurrentUser};
pub use state::AppState;
