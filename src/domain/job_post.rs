//! Job post entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HasSkills, Skill, SkillLink};
use crate::config::JOB_POST_SKILLS_TABLE;

/// A job posting owned by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    #[serde(default)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub location_id: i32,
    pub category_id: i32,
    pub description: String,
    pub apply_at: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl JobPost {
    /// Skill identities currently attached, in attachment order.
    pub fn skill_ids(&self) -> Vec<i32> {
        self.skills.iter().map(|skill| skill.id).collect()
    }
}

impl HasSkills for JobPost {
    fn skill_link(&self) -> SkillLink {
        SkillLink {
            join_table: JOB_POST_SKILLS_TABLE,
            owner_column: "job_post_id",
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
