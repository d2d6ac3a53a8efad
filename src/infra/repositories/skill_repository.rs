//! Skill lookups and the owner/skill join storage.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Alias, Expr, OnConflict, Query},
    ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder,
};

use super::entities::skill;
use crate::config::SKILL_LINK_COLUMN;
use crate::domain::{Skill, SkillLink};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Skill>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Skill>>;
}

/// Writes (owner, skill) rows into whatever join table a `SkillLink` names.
///
/// Both operations are idempotent: attaching an existing pair or detaching
/// a missing one succeeds without changes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SkillLinkRepository: Send + Sync {
    async fn attach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()>;

    async fn detach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()>;
}

pub struct SkillStore {
    db: DatabaseConnection,
}

impl SkillStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkillRepository for SkillStore {
    async fn find_all(&self) -> AppResult<Vec<Skill>> {
        let models = skill::Entity::find()
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Skill::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Skill>> {
        let model = skill::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Skill::from))
    }
}

/// SeaORM implementation of SkillLinkRepository.
///
/// Join tables are addressed by name so one store serves every owner kind.
pub struct SkillLinkStore {
    db: DatabaseConnection,
}

impl SkillLinkStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SkillLinkRepository for SkillLinkStore {
    async fn attach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()> {
        let stmt = Query::insert()
            .into_table(Alias::new(link.join_table))
            .columns([Alias::new(link.owner_column), Alias::new(SKILL_LINK_COLUMN)])
            .values_panic([link.owner_id.into(), skill_id.into()])
            .on_conflict(
                OnConflict::columns([Alias::new(link.owner_column), Alias::new(SKILL_LINK_COLUMN)])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&stmt)).await?;

        tracing::debug!(
            table = link.join_table,
            owner_id = link.owner_id,
            skill_id,
            "Skill attached"
        );
        Ok(())
    }

    async fn detach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()> {
        let stmt = Query::delete()
            .from_table(Alias::new(link.join_table))
            .and_where(Expr::col(Alias::new(link.owner_column)).eq(link.owner_id))
            .and_where(Expr::col(Alias::new(SKILL_LINK_COLUMN)).eq(skill_id))
            .to_owned();

        let backend = self.db.get_database_backend();
        let result = self.db.execute(backend.build(&stmt)).await?;

        tracing::debug!(
            table = link.join_table,
            owner_id = link.owner_id,
            skill_id,
            removed = result.rows_affected(),
            "Skill detached"
        );
        Ok(())
    }
}
