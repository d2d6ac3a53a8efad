//! Read-only catalog services: skills, categories and locations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Category, Location, Skill};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::{CategoryRepository, LocationRepository, SkillRepository};

#[async_trait]
pub trait SkillService: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Skill>>;

    async fn by_id(&self, id: i32) -> AppResult<Skill>;
}

#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Category>>;
}

#[async_trait]
pub trait LocationService: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Location>>;
}

pub struct SkillCatalog {
    repo: Arc<dyn SkillRepository>,
}

impl SkillCatalog {
    pub fn new(repo: Arc<dyn SkillRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SkillService for SkillCatalog {
    async fn find_all(&self) -> AppResult<Vec<Skill>> {
        self.repo.find_all().await
    }

    async fn by_id(&self, id: i32) -> AppResult<Skill> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }
}

pub struct CategoryCatalog {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryCatalog {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl CategoryService for CategoryCatalog {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        self.repo.find_all().await
    }
}

pub struct LocationCatalog {
    repo: Arc<dyn LocationRepository>,
}

impl LocationCatalog {
    pub fn new(repo: Arc<dyn LocationRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl LocationService for LocationCatalog {
    async fn find_all(&self) -> AppResult<Vec<Location>> {
        self.repo.find_all().await
    }
}
