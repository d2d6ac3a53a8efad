//! Service Container - Centralized service access.
//!
//! Wires repositories, notifier, clock and configuration into the
//! application services once at startup.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    CategoryCatalog, CategoryService, CompanyProfileManager, CompanyProfileService, JobPostManager,
    JobPostService, JwtSigner, LocationCatalog, LocationService, RelationshipManager,
    RelationshipService, SkillCatalog, SkillService, TokenIssuer, TokenService, UserManager,
    UserService,
};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Clock, LogNotifier, MemoryStore, Notifier, Repositories, SystemClock};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn job_posts(&self) -> Arc<dyn JobPostService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn company_profiles(&self) -> Arc<dyn CompanyProfileService>;

    fn skills(&self) -> Arc<dyn SkillService>;

    fn categories(&self) -> Arc<dyn CategoryService>;

    fn locations(&self) -> Arc<dyn LocationService>;

    fn relationships(&self) -> Arc<dyn RelationshipService>;

    fn tokens(&self) -> Arc<dyn TokenService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    job_posts: Arc<dyn JobPostService>,
    users: Arc<dyn UserService>,
    company_profiles: Arc<dyn CompanyProfileService>,
    skills: Arc<dyn SkillService>,
    categories: Arc<dyn CategoryService>,
    locations: Arc<dyn LocationService>,
    relationships: Arc<dyn RelationshipService>,
    tokens: Arc<dyn TokenService>,
}

impl Services {
    /// Build every service over the given gateways.
    ///
    /// Fails when the token signing key is missing.
    pub fn from_repositories(
        repos: Repositories,
        config: &Config,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let signer = Arc::new(JwtSigner::new(config.jwt_secret_bytes())?);

        Ok(Self {
            job_posts: Arc::new(JobPostManager::new(repos.job_posts.clone())),
            users: Arc::new(UserManager::new(
                repos.users.clone(),
                repos.pw_resets.clone(),
                repos.company_profiles.clone(),
                notifier,
                clock.clone(),
                config,
            )),
            company_profiles: Arc::new(CompanyProfileManager::new(repos.company_profiles.clone())),
            skills: Arc::new(SkillCatalog::new(repos.skills.clone())),
            categories: Arc::new(CategoryCatalog::new(repos.categories.clone())),
            locations: Arc::new(LocationCatalog::new(repos.locations.clone())),
            relationships: Arc::new(RelationshipManager::new(
                repos.skill_links.clone(),
                repos.company_benefits.clone(),
            )),
            tokens: Arc::new(TokenIssuer::new(signer, clock, config.token_issuer.clone())),
        })
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> AppResult<Self> {
        Self::from_repositories(
            Repositories::sea_orm(db),
            config,
            Arc::new(LogNotifier),
            Arc::new(SystemClock),
        )
    }

    /// Services over an in-memory store
    pub fn in_memory(store: MemoryStore, config: &Config) -> AppResult<Self> {
        Self::from_repositories(
            Repositories::in_memory(store),
            config,
            Arc::new(LogNotifier),
            Arc::new(SystemClock),
        )
    }
}

impl ServiceContainer for Services {
    fn job_posts(&self) -> Arc<dyn JobPostService> {
        self.job_posts.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    fn company_profiles(&self) -> Arc<dyn CompanyProfileService> {
        self.company_profiles.clone()
    }

    fn skills(&self) -> Arc<dyn SkillService> {
        self.skills.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.categories.clone()
    }

    fn locations(&self) -> Arc<dyn LocationService> {
        self.locations.clone()
    }

    fn relationships(&self) -> Arc<dyn RelationshipService> {
        self.relationships.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenService> {
        self.tokens.clone()
    }
}
