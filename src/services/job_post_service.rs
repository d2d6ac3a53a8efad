//! Job post service - Validated CRUD and search over job posts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::JobPost;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::JobPostRepository;
use crate::search::JobPostFilter;
use crate::validation::{job_post_pipeline, Pipeline};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Job post service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobPostService: Send + Sync {
    /// Posts matching the filter; an empty filter lists everything
    async fn find_all(&self, filter: &JobPostFilter) -> AppResult<Vec<JobPost>>;

    async fn by_id(&self, id: i32) -> AppResult<JobPost>;

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<JobPost>>;

    /// Validate, persist and backfill id and timestamps
    async fn create(&self, job_post: &mut JobPost) -> AppResult<()>;

    /// Validate and save every field of an existing post
    async fn update(&self, job_post: &mut JobPost) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of JobPostService.
pub struct JobPostManager {
    repo: Arc<dyn JobPostRepository>,
    validators: Pipeline<JobPost>,
}

impl JobPostManager {
    pub fn new(repo: Arc<dyn JobPostRepository>) -> Self {
        Self::with_validators(repo, job_post_pipeline())
    }

    pub fn with_validators(repo: Arc<dyn JobPostRepository>, validators: Pipeline<JobPost>) -> Self {
        Self { repo, validators }
    }
}

#[async_trait]
impl JobPostService for JobPostManager {
    async fn find_all(&self, filter: &JobPostFilter) -> AppResult<Vec<JobPost>> {
        let posts = self.repo.find(filter).await?;
        tracing::debug!(count = posts.len(), "Job posts found");
        Ok(posts)
    }

    async fn by_id(&self, id: i32) -> AppResult<JobPost> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn by_user_id(&self, user_id: i32) -> AppResult<Vec<JobPost>> {
        self.repo.find_by_user_id(user_id).await
    }

    #[instrument(skip_all, fields(user_id = job_post.user_id))]
    async fn create(&self, job_post: &mut JobPost) -> AppResult<()> {
        self.validators.run(job_post)?;
        self.repo.create(job_post).await?;

        tracing::info!(id = job_post.id, "Job post created");
        Ok(())
    }

    #[instrument(skip_all, fields(id = job_post.id))]
    async fn update(&self, job_post: &mut JobPost) -> AppResult<()> {
        self.validators.run(job_post)?;
        self.repo.update(job_post).await?;

        tracing::info!("Job post updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> AppResult<()> {
        if id <= 0 {
            return Err(AppError::InvalidId);
        }
        self.repo.delete(id).await?;

        tracing::info!("Job post deleted");
        Ok(())
    }
}
