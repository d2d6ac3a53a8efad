//! Domain layer - Core business entities and logic
//!
//! Plain entity values exchanged with the persistence gateway, plus the
//! owner capabilities the relationship manager dispatches on.

pub mod catalog;
pub mod company;
pub mod job_post;
pub mod owner;
pub mod password;
pub mod user;

pub use catalog::{Category, Location, Skill};
pub use company::{CompanyBenefit, CompanyProfile};
pub use job_post::JobPost;
pub use owner::{HasBenefits, HasSkills, SkillLink};
pub use password::Password;
pub use user::{NewUser, PwReset, User};
