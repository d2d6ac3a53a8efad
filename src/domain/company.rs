//! Company profile and the benefits it owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasBenefits, HasSkills, Skill, SkillLink};
use crate::config::COMPANY_PROFILE_SKILLS_TABLE;

/// Public profile of the company behind a user account (one per user).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub user_id: i32,
    pub website: String,
    pub founded_year: i32,
    pub description: String,
    pub company_logo_url: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub benefits: Vec<CompanyBenefit>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// A benefit advertised by a company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBenefit {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub company_profile_id: i32,
    pub benefit_name: String,
}

impl CompanyBenefit {
    pub fn new(benefit_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            company_profile_id: 0,
            benefit_name: benefit_name.into(),
        }
    }
}

impl HasSkills for CompanyProfile {
    fn skill_link(&self) -> SkillLink {
        SkillLink {
            join_table: COMPANY_PROFILE_SKILLS_TABLE,
            owner_column: "company_profile_id",
            owner_id: self.id,
        }
    }

    fn skills(&self) -> &[Skill] {
        &self.skills
    }

    fn skills_mut(&mut self) -> &mut Vec<Skill> {
        &mut self.skills
    }
}

impl HasBenefits for CompanyProfile {
    fn benefit_owner_id(&self) -> i32 {
        self.id
    }

    fn benefits(&self) -> &[CompanyBenefit] {
        &self.benefits
    }

    fn benefits_mut(&mut self) -> &mut Vec<CompanyBenefit> {
        &mut self.benefits
    }
}
