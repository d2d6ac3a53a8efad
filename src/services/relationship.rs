//! Relationship manager - Skills and benefits attached to owners.
//!
//! Owners are reached only through the `HasSkills` / `HasBenefits`
//! capabilities, so job posts and company profiles share one code path.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::domain::{CompanyBenefit, HasBenefits, HasSkills, Skill};
use crate::errors::{AppError, AppResult, ValidationError};
use crate::infra::repositories::{CompanyBenefitRepository, SkillLinkRepository};
use crate::validation::{benefit_name_required, benefit_pipeline, Pipeline};

#[async_trait]
pub trait RelationshipService: Send + Sync {
    /// Attach a skill. Attaching an existing member changes nothing.
    async fn add_skill_to_owner(&self, owner: Option<&mut dyn HasSkills>, skill: &Skill) -> AppResult<()>;

    /// Detach a skill. Detaching a non-member changes nothing.
    async fn delete_skill_from_owner(&self, owner: &mut dyn HasSkills, skill: &Skill) -> AppResult<()>;

    /// Persist a new benefit for the profile and append it
    async fn add_company_profile_benefit(
        &self,
        profile: Option<&mut dyn HasBenefits>,
        benefit: CompanyBenefit,
    ) -> AppResult<CompanyBenefit>;

    /// Overwrite an existing benefit of the same profile by identity
    async fn update_company_profile_benefit(&self, benefit: &CompanyBenefit) -> AppResult<()>;

    async fn remove_company_profile_benefit(
        &self,
        profile: Option<&mut dyn HasBenefits>,
        benefit: &CompanyBenefit,
    ) -> AppResult<()>;
}

pub struct RelationshipManager {
    links: Arc<dyn SkillLinkRepository>,
    benefits: Arc<dyn CompanyBenefitRepository>,
    benefit_validators: Pipeline<CompanyBenefit>,
}

impl RelationshipManager {
    pub fn new(links: Arc<dyn SkillLinkRepository>, benefits: Arc<dyn CompanyBenefitRepository>) -> Self {
        Self {
            links,
            benefits,
            benefit_validators: benefit_pipeline(),
        }
    }
}

#[async_trait]
impl RelationshipService for RelationshipManager {
    #[instrument(skip_all, fields(skill_id = skill.id))]
    async fn add_skill_to_owner(&self, owner: Option<&mut dyn HasSkills>, skill: &Skill) -> AppResult<()> {
        if skill.id <= 0 {
            return Err(AppError::InvalidId);
        }
        let owner = owner.ok_or(ValidationError::CompanyProfileRequired)?;

        let link = owner.skill_link();
        if link.owner_id <= 0 {
            return Err(AppError::InvalidId);
        }
        if owner.has_skill(skill.id) {
            return Ok(());
        }

        self.links.attach(&link, skill.id).await?;
        owner.skills_mut().push(skill.clone());

        tracing::info!(table = link.join_table, owner_id = link.owner_id, "Skill added");
        Ok(())
    }

    #[instrument(skip_all, fields(skill_id = skill.id))]
    async fn delete_skill_from_owner(&self, owner: &mut dyn HasSkills, skill: &Skill) -> AppResult<()> {
        let link = owner.skill_link();
        self.links.detach(&link, skill.id).await?;
        owner.skills_mut().retain(|s| s.id != skill.id);

        tracing::info!(table = link.join_table, owner_id = link.owner_id, "Skill removed");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn add_company_profile_benefit(
        &self,
        profile: Option<&mut dyn HasBenefits>,
        mut benefit: CompanyBenefit,
    ) -> AppResult<CompanyBenefit> {
        let profile = profile.ok_or(ValidationError::CompanyProfileRequired)?;
        benefit_name_required(&benefit)?;

        benefit.id = 0;
        benefit.company_profile_id = profile.benefit_owner_id();
        self.benefits.create(&mut benefit).await?;
        profile.benefits_mut().push(benefit.clone());

        tracing::info!(id = benefit.id, profile_id = benefit.company_profile_id, "Benefit added");
        Ok(benefit)
    }

    #[instrument(skip_all, fields(id = benefit.id))]
    async fn update_company_profile_benefit(&self, benefit: &CompanyBenefit) -> AppResult<()> {
        self.benefit_validators.run(benefit)?;

        // A benefit never moves between profiles.
        match self.benefits.find_by_id(benefit.id).await? {
            Some(stored) if stored.company_profile_id == benefit.company_profile_id => {}
            _ => return Err(ValidationError::CompanyBenefitRequired.into()),
        }
        self.benefits.update(benefit).await?;

        tracing::info!("Benefit updated");
        Ok(())
    }

    #[instrument(skip_all, fields(id = benefit.id))]
    async fn remove_company_profile_benefit(
        &self,
        profile: Option<&mut dyn HasBenefits>,
        benefit: &CompanyBenefit,
    ) -> AppResult<()> {
        let profile = profile.ok_or(ValidationError::CompanyProfileRequired)?;

        self.benefits
            .delete(profile.benefit_owner_id(), benefit.id)
            .await?;
        profile.benefits_mut().retain(|b| b.id != benefit.id);

        tracing::info!("Benefit removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompanyProfile, JobPost};
    use crate::infra::repositories::{MockCompanyBenefitRepository, MockSkillLinkRepository};

    fn manager(links: MockSkillLinkRepository, benefits: MockCompanyBenefitRepository) -> RelationshipManager {
        RelationshipManager::new(Arc::new(links), Arc::new(benefits))
    }

    fn profile() -> CompanyProfile {
        CompanyProfile {
            id: 4,
            user_id: 1,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_skill_is_idempotent() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_attach().times(1).returning(|_, _| Ok(()));
        let relationships = manager(links, MockCompanyBenefitRepository::new());

        let mut post = JobPost {
            id: 5,
            ..Default::default()
        };
        let skill = Skill::new(3, "Go");
        relationships.add_skill_to_owner(Some(&mut post), &skill).await.unwrap();
        relationships.add_skill_to_owner(Some(&mut post), &skill).await.unwrap();

        assert_eq!(post.skills, vec![skill]);
    }

    #[tokio::test]
    async fn test_add_skill_with_zero_id_is_invalid() {
        let mut links = MockSkillLinkRepository::new();
        links.expect_attach().never();
        let relationships = manager(links, MockCompanyBenefitRepository::new());

        let mut post = JobPost {
            id: 5,
            ..Default::default()
        };
        let result = relationships
            .add_skill_to_owner(Some(&mut post), &Skill::with_id(0))
            .await;
        assert!(matches!(result, Err(AppError::InvalidId)));

        let mut company = profile();
        let result = relationships
            .add_skill_to_owner(Some(&mut company), &Skill::with_id(0))
            .await;
        assert!(matches!(result, Err(AppError::InvalidId)));
    }

    #[tokio::test]
    async fn test_add_skill_without_owner() {
        let relationships = manager(MockSkillLinkRepository::new(), MockCompanyBenefitRepository::new());

        let err = relationships
            .add_skill_to_owner(None, &Skill::with_id(2))
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::CompanyProfileRequired));
    }

    #[tokio::test]
    async fn test_add_benefit_without_profile() {
        let mut benefits = MockCompanyBenefitRepository::new();
        benefits.expect_create().never();
        let relationships = manager(MockSkillLinkRepository::new(), benefits);

        let err = relationships
            .add_company_profile_benefit(None, CompanyBenefit::new("Remote"))
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::CompanyProfileRequired));
    }

    #[tokio::test]
    async fn test_add_benefit_requires_name() {
        let relationships = manager(MockSkillLinkRepository::new(), MockCompanyBenefitRepository::new());
        let mut company = profile();

        let err = relationships
            .add_company_profile_benefit(Some(&mut company), CompanyBenefit::new(""))
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::BenefitNameRequired));
    }

    #[tokio::test]
    async fn test_add_benefit_appends_with_identity() {
        let mut benefits = MockCompanyBenefitRepository::new();
        benefits.expect_create().times(1).returning(|benefit| {
            benefit.id = 21;
            Ok(())
        });
        let relationships = manager(MockSkillLinkRepository::new(), benefits);
        let mut company = profile();

        let added = relationships
            .add_company_profile_benefit(Some(&mut company), CompanyBenefit::new("Remote"))
            .await
            .unwrap();

        assert_eq!(added.id, 21);
        assert_eq!(added.company_profile_id, 4);
        assert_eq!(company.benefits, vec![added]);
    }

    #[tokio::test]
    async fn test_update_missing_benefit() {
        let mut benefits = MockCompanyBenefitRepository::new();
        benefits.expect_find_by_id().returning(|_| Ok(None));
        benefits.expect_update().never();
        let relationships = manager(MockSkillLinkRepository::new(), benefits);

        let benefit = CompanyBenefit {
            id: 8,
            company_profile_id: 4,
            benefit_name: "Gym".to_string(),
        };
        let err = relationships
            .update_company_profile_benefit(&benefit)
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::CompanyBenefitRequired));
    }

    #[tokio::test]
    async fn test_update_cannot_move_benefit_to_other_profile() {
        let mut benefits = MockCompanyBenefitRepository::new();
        benefits.expect_find_by_id().returning(|id| {
            Ok(Some(CompanyBenefit {
                id,
                company_profile_id: 4,
                benefit_name: "Gym".to_string(),
            }))
        });
        benefits.expect_update().never();
        let relationships = manager(MockSkillLinkRepository::new(), benefits);

        let moved = CompanyBenefit {
            id: 8,
            company_profile_id: 9,
            benefit_name: "Gym".to_string(),
        };
        let err = relationships
            .update_company_profile_benefit(&moved)
            .await
            .unwrap_err();
        assert_eq!(err.validation(), Some(ValidationError::CompanyBenefitRequired));
    }
}
