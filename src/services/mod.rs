//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate validation and persistence. They depend on
//! repository traits, never on a concrete store.

mod auth_service;
mod catalog_service;
mod company_profile_service;
pub mod container;
mod job_post_service;
mod relationship;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthClaims, JwtSigner, TokenIssuer, TokenService, TokenSigner};
pub use catalog_service::{
    CategoryCatalog, CategoryService, LocationCatalog, LocationService, SkillCatalog, SkillService,
};
pub use company_profile_service::{CompanyProfileManager, CompanyProfileService};
pub use job_post_service::{JobPostManager, JobPostService};
pub use relationship::{RelationshipManager, RelationshipService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::{MockTokenService, MockTokenSigner};
#[cfg(any(test, feature = "test-utils"))]
pub use company_profile_service::MockCompanyProfileService;
#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use job_post_service::MockJobPostService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
