//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod company_benefit;
pub mod company_profile;
pub mod company_profile_skill;
pub mod job_post;
pub mod job_post_skill;
pub mod location;
pub mod pw_reset;
pub mod skill;
pub mod user;
