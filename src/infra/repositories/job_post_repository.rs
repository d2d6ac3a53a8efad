//! Job post repository: trait plus the SeaORM implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, Query, SimpleExpr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::entities::{job_post, job_post_skill, skill};
use crate::domain::{JobPost, Skill};
use crate::errors::{AppError, AppResult};
use crate::search::{Criterion, JobPostFilter};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence gateway for job posts.
///
/// Returned posts always carry their attached skills.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobPostRepository: Send + Sync {
    /// Find posts matching every criterion of the filter
    async fn find(&self, filter: &JobPostFilter) -> AppResult<Vec<JobPost>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<JobPost>>;

    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<JobPost>>;

    /// Insert and backfill id and timestamps. Skills listed on the post are linked.
    async fn create(&self, job_post: &mut JobPost) -> AppResult<()>;

    /// Overwrite every column of an existing post and backfill timestamps.
    async fn update(&self, job_post: &mut JobPost) -> AppResult<()>;

    /// Delete a post and its skill links.
    async fn delete(&self, id: i32) -> AppResult<()>;
}

/// Relational condition equivalent to `JobPostFilter::matches`.
pub fn filter_condition(filter: &JobPostFilter) -> Condition {
    filter
        .criteria()
        .into_iter()
        .fold(Condition::all(), |condition, criterion| {
            condition.add(criterion_expr(criterion))
        })
}

fn criterion_expr(criterion: Criterion) -> SimpleExpr {
    match criterion {
        Criterion::TitleContains(title) => {
            let pattern = format!("%{}%", escape_like(&title.to_uppercase()));
            Expr::expr(Func::upper(Expr::col((job_post::Entity, job_post::Column::Title))))
                .like(LikeExpr::new(pattern).escape('\\'))
        }
        Criterion::UserId(id) => job_post::Column::UserId.eq(id),
        Criterion::LocationId(id) => job_post::Column::LocationId.eq(id),
        Criterion::CategoryId(id) => job_post::Column::CategoryId.eq(id),
        Criterion::Description(text) => job_post::Column::Description.eq(text),
        Criterion::ApplyAt(target) => job_post::Column::ApplyAt.eq(target),
        Criterion::AnySkill(ids) => job_post::Column::Id.in_subquery(
            Query::select()
                .column(job_post_skill::Column::JobPostId)
                .from(job_post_skill::Entity)
                .and_where(job_post_skill::Column::SkillId.is_in(ids))
                .to_owned(),
        ),
    }
}

/// Make `%`, `_` and `\` match literally inside a LIKE pattern.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// SeaORM implementation of JobPostRepository
pub struct JobPostStore {
    db: DatabaseConnection,
}

impl JobPostStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach skills to each model and convert to domain values.
    async fn with_skills(&self, models: Vec<job_post::Model>) -> AppResult<Vec<JobPost>> {
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let links = job_post_skill::Entity::find()
            .filter(job_post_skill::Column::JobPostId.is_in(ids))
            .all(&self.db)
            .await?;

        let skill_ids: Vec<i32> = links.iter().map(|l| l.skill_id).collect();
        let skills: HashMap<i32, Skill> = skill::Entity::find()
            .filter(skill::Column::Id.is_in(skill_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| (m.id, Skill::from(m)))
            .collect();

        let mut by_post: HashMap<i32, Vec<Skill>> = HashMap::new();
        for link in links {
            if let Some(skill) = skills.get(&link.skill_id) {
                by_post.entry(link.job_post_id).or_default().push(skill.clone());
            }
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let id = model.id;
                let mut post = JobPost::from(model);
                post.skills = by_post.remove(&id).unwrap_or_default();
                post
            })
            .collect())
    }
}

#[async_trait]
impl JobPostRepository for JobPostStore {
    async fn find(&self, filter: &JobPostFilter) -> AppResult<Vec<JobPost>> {
        let models = job_post::Entity::find()
            .filter(filter_condition(filter))
            .order_by_asc(job_post::Column::Id)
            .all(&self.db)
            .await?;

        self.with_skills(models).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<JobPost>> {
        let Some(model) = job_post::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_skills(vec![model]).await?.pop())
    }

    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<JobPost>> {
        let models = job_post::Entity::find()
            .filter(job_post::Column::UserId.eq(user_id))
            .order_by_asc(job_post::Column::Id)
            .all(&self.db)
            .await?;

        self.with_skills(models).await
    }

    async fn create(&self, job_post: &mut JobPost) -> AppResult<()> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = job_post::ActiveModel {
            id: NotSet,
            user_id: Set(job_post.user_id),
            title: Set(job_post.title.clone()),
            location_id: Set(job_post.location_id),
            category_id: Set(job_post.category_id),
            description: Set(job_post.description.clone()),
            apply_at: Set(job_post.apply_at.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut linked: Vec<Skill> = Vec::new();
        for skill in job_post.skills.iter().filter(|s| s.id > 0) {
            if linked.iter().any(|l| l.id == skill.id) {
                continue;
            }
            job_post_skill::ActiveModel {
                job_post_id: Set(model.id),
                skill_id: Set(skill.id),
            }
            .insert(&txn)
            .await?;
            linked.push(skill.clone());
        }

        txn.commit().await?;

        job_post.id = model.id;
        job_post.created_at = model.created_at;
        job_post.updated_at = model.updated_at;
        job_post.skills = linked;
        Ok(())
    }

    async fn update(&self, job_post: &mut JobPost) -> AppResult<()> {
        let result = job_post::ActiveModel {
            id: Set(job_post.id),
            user_id: Set(job_post.user_id),
            title: Set(job_post.title.clone()),
            location_id: Set(job_post.location_id),
            category_id: Set(job_post.category_id),
            description: Set(job_post.description.clone()),
            apply_at: Set(job_post.apply_at.clone()),
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

        job_post.created_at = model.created_at;
        job_post.updated_at = model.updated_at;
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let txn = self.db.begin().await?;

        job_post_skill::Entity::delete_many()
            .filter(job_post_skill::Column::JobPostId.eq(id))
            .exec(&txn)
            .await?;

        let result = job_post::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QuerySelect, QueryTrait};

    fn sql(filter: &JobPostFilter) -> String {
        job_post::Entity::find()
            .select_only()
            .column(job_post::Column::Id)
            .filter(filter_condition(filter))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_filter_has_no_conditions() {
        assert!(filter_condition(&JobPostFilter::new()).is_empty());
    }

    #[test]
    fn test_title_uses_upper_like() {
        let rendered = sql(&JobPostFilter::new().title("golang"));
        assert!(rendered.contains("UPPER(\"job_posts\".\"title\") LIKE '%GOLANG%'"));
    }

    #[test]
    fn test_title_wildcards_are_literal() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("C_\\"), "C\\_\\\\");

        let rendered = sql(&JobPostFilter::new().title("100%"));
        assert!(rendered.contains("ESCAPE"));
        assert!(!rendered.contains("'%100%%'"));
    }

    #[test]
    fn test_skills_use_join_subquery() {
        let rendered = sql(&JobPostFilter::new().location_id(2).skill_ids([3, 4]));
        assert!(rendered.contains("\"job_posts\".\"location_id\" = 2"));
        assert!(rendered.contains("FROM \"job_post_skills\""));
        assert!(rendered.contains("\"skill_id\" IN (3, 4)"));
    }
}
