//! Company profile service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::CompanyProfile;
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::CompanyProfileRepository;
use crate::validation::{profile_pipeline, Pipeline};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyProfileService: Send + Sync {
    /// Profile with its skills and benefits
    async fn by_user_id(&self, user_id: i32) -> AppResult<CompanyProfile>;

    /// Create or replace the profile of `profile.user_id`
    async fn save(&self, profile: &mut CompanyProfile) -> AppResult<()>;
}

pub struct CompanyProfileManager {
    repo: Arc<dyn CompanyProfileRepository>,
    validators: Pipeline<CompanyProfile>,
}

impl CompanyProfileManager {
    pub fn new(repo: Arc<dyn CompanyProfileRepository>) -> Self {
        Self {
            repo,
            validators: profile_pipeline(),
        }
    }
}

#[async_trait]
impl CompanyProfileService for CompanyProfileManager {
    async fn by_user_id(&self, user_id: i32) -> AppResult<CompanyProfile> {
        self.repo.find_by_user_id(user_id).await?.ok_or_not_found()
    }

    #[instrument(skip_all, fields(user_id = profile.user_id))]
    async fn save(&self, profile: &mut CompanyProfile) -> AppResult<()> {
        self.validators.run(profile)?;
        self.repo.save(profile).await?;

        tracing::info!(id = profile.id, "Company profile saved");
        Ok(())
    }
}
