//! Search filter builder for job posts.
//!
//! A `JobPostFilter` is a sparse set of optional criteria. It normalizes into
//! a list of `Criterion` values whose logical AND is the query predicate:
//! the in-memory gateway evaluates it with `matches`, the SQL gateway turns
//! the same criteria into a relational condition.

use serde::Deserialize;

use crate::domain::JobPost;

/// A single constraint on job posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Case-insensitive substring match on the title
    TitleContains(String),
    UserId(i32),
    LocationId(i32),
    CategoryId(i32),
    Description(String),
    ApplyAt(String),
    /// Post has at least one of these skills
    AnySkill(Vec<i32>),
}

impl Criterion {
    pub fn matches(&self, post: &JobPost) -> bool {
        match self {
            Criterion::TitleContains(needle) => post
                .title
                .to_uppercase()
                .contains(&needle.to_uppercase()),
            Criterion::UserId(id) => post.user_id == *id,
            Criterion::LocationId(id) => post.location_id == *id,
            Criterion::CategoryId(id) => post.category_id == *id,
            Criterion::Description(text) => post.description == *text,
            Criterion::ApplyAt(target) => post.apply_at == *target,
            Criterion::AnySkill(ids) => post.skills.iter().any(|skill| ids.contains(&skill.id)),
        }
    }
}

/// Sparse job post search criteria. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobPostFilter {
    pub title: Option<String>,
    pub user_id: Option<i32>,
    pub location_id: Option<i32>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub apply_at: Option<String>,
    #[serde(default)]
    pub skill_ids: Vec<i32>,
}

impl JobPostFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn user_id(mut self, id: i32) -> Self {
        self.user_id = Some(id);
        self
    }

    pub fn location_id(mut self, id: i32) -> Self {
        self.location_id = Some(id);
        self
    }

    pub fn category_id(mut self, id: i32) -> Self {
        self.category_id = Some(id);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn apply_at(mut self, apply_at: impl Into<String>) -> Self {
        self.apply_at = Some(apply_at.into());
        self
    }

    pub fn skill_ids(mut self, ids: impl IntoIterator<Item = i32>) -> Self {
        self.skill_ids.extend(ids);
        self
    }

    /// Normalized criteria. Empty strings and non-positive ids count as
    /// absent, matching the zero-value semantics of the filter fields.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();

        if let Some(title) = non_empty(&self.title) {
            criteria.push(Criterion::TitleContains(title.to_string()));
        }
        if let Some(id) = positive(self.user_id) {
            criteria.push(Criterion::UserId(id));
        }
        if let Some(id) = positive(self.location_id) {
            criteria.push(Criterion::LocationId(id));
        }
        if let Some(id) = positive(self.category_id) {
            criteria.push(Criterion::CategoryId(id));
        }
        if let Some(text) = non_empty(&self.description) {
            criteria.push(Criterion::Description(text.to_string()));
        }
        if let Some(target) = non_empty(&self.apply_at) {
            criteria.push(Criterion::ApplyAt(target.to_string()));
        }

        let mut skill_ids: Vec<i32> = self.skill_ids.iter().copied().filter(|id| *id > 0).collect();
        skill_ids.sort_unstable();
        skill_ids.dedup();
        if !skill_ids.is_empty() {
            criteria.push(Criterion::AnySkill(skill_ids));
        }

        criteria
    }

    /// True when no criterion is set (the filter matches every post).
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// Evaluate the filter against a job post (logical AND of all criteria).
    pub fn matches(&self, post: &JobPost) -> bool {
        self.criteria().iter().all(|criterion| criterion.matches(post))
    }
}

/// Build a filter from a partially populated job post, treating every
/// non-zero field as a criterion.
impl From<&JobPost> for JobPostFilter {
    fn from(post: &JobPost) -> Self {
        Self {
            title: Some(post.title.clone()),
            user_id: Some(post.user_id),
            location_id: Some(post.location_id),
            category_id: Some(post.category_id),
            description: Some(post.description.clone()),
            apply_at: Some(post.apply_at.clone()),
            skill_ids: post.skill_ids(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn positive(value: Option<i32>) -> Option<i32> {
    value.filter(|id| *id > 0)
}
