//! User and password reset persistence.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};

use super::entities::{pw_reset, user};
use crate::domain::{PwReset, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait.
///
/// Returned users never carry a company profile; services attach it.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Lookup by email (already normalized by the caller)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(&self, user: &mut User) -> AppResult<()>;

    async fn update(&self, user: &mut User) -> AppResult<()>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PwResetRepository: Send + Sync {
    async fn create(&self, reset: &mut PwReset) -> AppResult<()>;

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PwReset>>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// SeaORM implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn create(&self, user: &mut User) -> AppResult<()> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role_id: Set(user.role_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        user.id = model.id;
        user.created_at = model.created_at;
        user.updated_at = model.updated_at;
        Ok(())
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let result = user::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role_id: Set(user.role_id),
            created_at: NotSet,
            updated_at: Set(Utc::now()),
        }
        .update(&self.db)
        .await;

        let model = match result {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) => return Err(AppError::NotFound),
            Err(e) => return Err(e.into()),
        };

        user.created_at = model.created_at;
        user.updated_at = model.updated_at;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

pub struct PwResetStore {
    db: DatabaseConnection,
}

impl PwResetStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PwResetRepository for PwResetStore {
    async fn create(&self, reset: &mut PwReset) -> AppResult<()> {
        let model = pw_reset::ActiveModel {
            id: NotSet,
            user_id: Set(reset.user_id),
            token_hash: Set(reset.token_hash.clone()),
            created_at: Set(reset.created_at),
        }
        .insert(&self.db)
        .await?;

        reset.id = model.id;
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PwReset>> {
        let model = pw_reset::Entity::find()
            .filter(pw_reset::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await?;
        Ok(model.map(PwReset::from))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        pw_reset::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
