//! Read-only reference data: locations and categories.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use super::entities::{category, location};
use crate::domain::{Category, Location};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Location>>;
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Category>>;
}

/// SeaORM store for both catalog tables
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocationRepository for CatalogStore {
    async fn find_all(&self) -> AppResult<Vec<Location>> {
        let models = location::Entity::find()
            .order_by_asc(location::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Location::from).collect())
    }
}

#[async_trait]
impl CategoryRepository for CatalogStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }
}
