//! Environment-driven settings plus the fixed rules of the board
//! (token window, reset lifetime, join tables).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
