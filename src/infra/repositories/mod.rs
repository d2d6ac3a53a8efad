//! Repository layer - Data access abstraction
//!
//! Every gateway is a trait object so services run unchanged against
//! PostgreSQL (the `*Store` types) or the in-memory `MemoryStore`.

mod catalog_repository;
mod company_repository;
pub(crate) mod entities;
mod job_post_repository;
mod skill_repository;
mod user_repository;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::memory::MemoryStore;

pub use catalog_repository::{CatalogStore, CategoryRepository, LocationRepository};
pub use company_repository::{
    CompanyBenefitRepository, CompanyBenefitStore, CompanyProfileRepository, CompanyProfileStore,
};
pub use job_post_repository::{filter_condition, JobPostRepository, JobPostStore};
pub use skill_repository::{SkillLinkRepository, SkillLinkStore, SkillRepository, SkillStore};
pub use user_repository::{PwResetRepository, PwResetStore, UserRepository, UserStore};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use catalog_repository::{MockCategoryRepository, MockLocationRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use company_repository::{MockCompanyBenefitRepository, MockCompanyProfileRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use job_post_repository::MockJobPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use skill_repository::{MockSkillLinkRepository, MockSkillRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::{MockPwResetRepository, MockUserRepository};

/// One handle per gateway, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub job_posts: Arc<dyn JobPostRepository>,
    pub skills: Arc<dyn SkillRepository>,
    pub skill_links: Arc<dyn SkillLinkRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub company_profiles: Arc<dyn CompanyProfileRepository>,
    pub company_benefits: Arc<dyn CompanyBenefitRepository>,
    pub users: Arc<dyn UserRepository>,
    pub pw_resets: Arc<dyn PwResetRepository>,
}

impl Repositories {
    /// PostgreSQL-backed gateways sharing one connection pool
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        let catalog = Arc::new(CatalogStore::new(db.clone()));
        Self {
            job_posts: Arc::new(JobPostStore::new(db.clone())),
            skills: Arc::new(SkillStore::new(db.clone())),
            skill_links: Arc::new(SkillLinkStore::new(db.clone())),
            locations: catalog.clone(),
            categories: catalog,
            company_profiles: Arc::new(CompanyProfileStore::new(db.clone())),
            company_benefits: Arc::new(CompanyBenefitStore::new(db.clone())),
            users: Arc::new(UserStore::new(db.clone())),
            pw_resets: Arc::new(PwResetStore::new(db)),
        }
    }

    /// Gateways backed by a single in-memory store
    pub fn in_memory(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            job_posts: store.clone(),
            skills: store.clone(),
            skill_links: store.clone(),
            locations: store.clone(),
            categories: store.clone(),
            company_profiles: store.clone(),
            company_benefits: store.clone(),
            users: store.clone(),
            pw_resets: store,
        }
    }
}
