//! Company profiles and their benefits.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::entities::{company_benefit, company_profile, company_profile_skill, skill};
use crate::domain::{CompanyBenefit, CompanyProfile, Skill};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyProfileRepository: Send + Sync {
    /// Profile of a user, with skills and benefits loaded
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<CompanyProfile>>;

    /// Insert or update the profile owned by `profile.user_id`.
    ///
    /// Skills and benefits are managed separately and left untouched.
    async fn save(&self, profile: &mut CompanyProfile) -> AppResult<()>;
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CompanyBenefitRepository: Send + Sync {
    async fn create(&self, benefit: &mut CompanyBenefit) -> AppResult<()>;

    async fn update(&self, benefit: &CompanyBenefit) -> AppResult<()>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CompanyBenefit>>;

    /// Remove a benefit of the given profile. Missing rows are not an error.
    async fn delete(&self, company_profile_id: i32, id: i32) -> AppResult<()>;
}

pub struct CompanyProfileStore {
    db: DatabaseConnection,
}

impl CompanyProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_skills(&self, profile_id: i32) -> AppResult<Vec<Skill>> {
        let skill_ids: Vec<i32> = company_profile_skill::Entity::find()
            .filter(company_profile_skill::Column::CompanyProfileId.eq(profile_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.skill_id)
            .collect();

        let models = skill::Entity::find()
            .filter(skill::Column::Id.is_in(skill_ids))
            .order_by_asc(skill::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Skill::from).collect())
    }

    async fn load_benefits(&self, profile_id: i32) -> AppResult<Vec<CompanyBenefit>> {
        let models = company_benefit::Entity::find()
            .filter(company_benefit::Column::CompanyProfileId.eq(profile_id))
            .order_by_asc(company_benefit::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(CompanyBenefit::from).collect())
    }
}

#[async_trait]
impl CompanyProfileRepository for CompanyProfileStore {
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<CompanyProfile>> {
        let Some(model) = company_profile::Entity::find()
            .filter(company_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut profile = CompanyProfile::from(model);
        profile.skills = self.load_skills(profile.id).await?;
        profile.benefits = self.load_benefits(profile.id).await?;
        Ok(Some(profile))
    }

    async fn save(&self, profile: &mut CompanyProfile) -> AppResult<()> {
        let now = Utc::now();
        let existing = company_profile::Entity::find()
            .filter(company_profile::Column::UserId.eq(profile.user_id))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(current) => {
                company_profile::ActiveModel {
                    id: Set(current.id),
                    user_id: Set(profile.user_id),
                    website: Set(profile.website.clone()),
                    founded_year: Set(profile.founded_year),
                    description: Set(profile.description.clone()),
                    company_logo_url: Set(profile.company_logo_url.clone()),
                    created_at: NotSet,
                    updated_at: Set(now),
                }
                .update(&self.db)
                .await?
            }
            None => {
                company_profile::ActiveModel {
                    id: NotSet,
                    user_id: Set(profile.user_id),
                    website: Set(profile.website.clone()),
                    founded_year: Set(profile.founded_year),
                    description: Set(profile.description.clone()),
                    company_logo_url: Set(profile.company_logo_url.clone()),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };

        profile.id = model.id;
        profile.created_at = model.created_at;
        profile.updated_at = model.updated_at;
        Ok(())
    }
}

pub struct CompanyBenefitStore {
    db: DatabaseConnection,
}

impl CompanyBenefitStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CompanyBenefitRepository for CompanyBenefitStore {
    async fn create(&self, benefit: &mut CompanyBenefit) -> AppResult<()> {
        let model = company_benefit::ActiveModel {
            id: NotSet,
            company_profile_id: Set(benefit.company_profile_id),
            benefit_name: Set(benefit.benefit_name.clone()),
        }
        .insert(&self.db)
        .await?;

        benefit.id = model.id;
        Ok(())
    }

    async fn update(&self, benefit: &CompanyBenefit) -> AppResult<()> {
        let result = company_benefit::ActiveModel {
            id: Set(benefit.id),
            company_profile_id: Set(benefit.company_profile_id),
            benefit_name: Set(benefit.benefit_name.clone()),
        }
        .update(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CompanyBenefit>> {
        let model = company_benefit::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(CompanyBenefit::from))
    }

    async fn delete(&self, company_profile_id: i32, id: i32) -> AppResult<()> {
        company_benefit::Entity::delete_many()
            .filter(company_benefit::Column::Id.eq(id))
            .filter(company_benefit::Column::CompanyProfileId.eq(company_profile_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
