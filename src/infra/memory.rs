//! In-memory persistence gateway.
//!
//! Implements every repository trait over one mutex-guarded set of tables.
//! Used by the CLI when no database is configured and by integration tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::repositories::{
    CategoryRepository, CompanyBenefitRepository, CompanyProfileRepository, JobPostRepository,
    LocationRepository, PwResetRepository, SkillLinkRepository, SkillRepository, UserRepository,
};
use crate::config::{COMPANY_PROFILE_SKILLS_TABLE, JOB_POST_SKILLS_TABLE};
use crate::domain::{
    Category, CompanyBenefit, CompanyProfile, JobPost, Location, PwReset, Skill, SkillLink, User,
};
use crate::errors::{AppError, AppResult, ValidationError};
use crate::search::JobPostFilter;

#[derive(Default)]
struct Tables {
    sequence: i32,
    job_posts: BTreeMap<i32, JobPost>,
    skills: BTreeMap<i32, Skill>,
    locations: BTreeMap<i32, Location>,
    categories: BTreeMap<i32, Category>,
    profiles: BTreeMap<i32, CompanyProfile>,
    benefits: BTreeMap<i32, CompanyBenefit>,
    users: BTreeMap<i32, User>,
    pw_resets: BTreeMap<i32, PwReset>,
    /// (owner id, skill id) pairs per join table
    links: HashMap<&'static str, BTreeSet<(i32, i32)>>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.sequence += 1;
        self.sequence
    }

    fn linked_skills(&self, table: &str, owner_id: i32) -> Vec<Skill> {
        self.links
            .get(table)
            .into_iter()
            .flat_map(|pairs| pairs.iter())
            .filter(|(owner, _)| *owner == owner_id)
            .map(|(_, skill_id)| {
                self.skills
                    .get(skill_id)
                    .cloned()
                    .unwrap_or_else(|| Skill::with_id(*skill_id))
            })
            .collect()
    }

    fn unlink_owner(&mut self, table: &str, owner_id: i32) {
        if let Some(pairs) = self.links.get_mut(table) {
            pairs.retain(|(owner, _)| *owner != owner_id);
        }
    }

    fn hydrate_post(&self, post: &JobPost) -> JobPost {
        let mut post = post.clone();
        post.skills = self.linked_skills(JOB_POST_SKILLS_TABLE, post.id);
        post
    }

    fn hydrate_profile(&self, profile: &CompanyProfile) -> CompanyProfile {
        let mut profile = profile.clone();
        profile.skills = self.linked_skills(COMPANY_PROFILE_SKILLS_TABLE, profile.id);
        profile.benefits = self
            .benefits
            .values()
            .filter(|benefit| benefit.company_profile_id == profile.id)
            .cloned()
            .collect();
        profile
    }
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> AppResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| AppError::internal("memory store lock poisoned"))
    }

    /// Seed a skill, returning it with its assigned id.
    pub fn insert_skill(&self, skill_name: &str) -> AppResult<Skill> {
        let mut tables = self.tables()?;
        let skill = Skill::new(tables.next_id(), skill_name);
        tables.skills.insert(skill.id, skill.clone());
        Ok(skill)
    }

    pub fn insert_location(&self, location_name: &str) -> AppResult<Location> {
        let mut tables = self.tables()?;
        let location = Location {
            id: tables.next_id(),
            location_name: location_name.to_string(),
        };
        tables.locations.insert(location.id, location.clone());
        Ok(location)
    }

    pub fn insert_category(&self, category_name: &str) -> AppResult<Category> {
        let mut tables = self.tables()?;
        let category = Category {
            id: tables.next_id(),
            category_name: category_name.to_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Number of stored (owner, skill) pairs in a join table
    pub fn link_count(&self, join_table: &str) -> AppResult<usize> {
        let tables = self.tables()?;
        Ok(tables.links.get(join_table).map_or(0, |pairs| pairs.len()))
    }
}

#[async_trait]
impl JobPostRepository for MemoryStore {
    async fn find(&self, filter: &JobPostFilter) -> AppResult<Vec<JobPost>> {
        let tables = self.tables()?;
        Ok(tables
            .job_posts
            .values()
            .map(|post| tables.hydrate_post(post))
            .filter(|post| filter.matches(post))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<JobPost>> {
        let tables = self.tables()?;
        Ok(tables.job_posts.get(&id).map(|post| tables.hydrate_post(post)))
    }

    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<JobPost>> {
        let tables = self.tables()?;
        Ok(tables
            .job_posts
            .values()
            .filter(|post| post.user_id == user_id)
            .map(|post| tables.hydrate_post(post))
            .collect())
    }

    async fn create(&self, job_post: &mut JobPost) -> AppResult<()> {
        let mut tables = self.tables()?;
        let now = Utc::now();

        job_post.id = tables.next_id();
        job_post.created_at = now;
        job_post.updated_at = now;

        let pairs = tables.links.entry(JOB_POST_SKILLS_TABLE).or_default();
        for skill in job_post.skills.iter().filter(|s| s.id > 0) {
            pairs.insert((job_post.id, skill.id));
        }

        let mut stored = job_post.clone();
        stored.skills.clear();
        tables.job_posts.insert(stored.id, stored);

        *job_post = tables.hydrate_post(job_post);
        Ok(())
    }

    async fn update(&self, job_post: &mut JobPost) -> AppResult<()> {
        let mut tables = self.tables()?;
        let created_at = tables
            .job_posts
            .get(&job_post.id)
            .map(|current| current.created_at)
            .ok_or(AppError::NotFound)?;

        job_post.created_at = created_at;
        job_post.updated_at = Utc::now();

        let mut stored = job_post.clone();
        stored.skills.clear();
        tables.job_posts.insert(stored.id, stored);
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tables = self.tables()?;
        if tables.job_posts.remove(&id).is_none() {
            return Err(AppError::NotFound);
        }
        tables.unlink_owner(JOB_POST_SKILLS_TABLE, id);
        Ok(())
    }
}

#[async_trait]
impl SkillRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Skill>> {
        Ok(self.tables()?.skills.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Skill>> {
        Ok(self.tables()?.skills.get(&id).cloned())
    }
}

#[async_trait]
impl SkillLinkRepository for MemoryStore {
    async fn attach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()> {
        let mut tables = self.tables()?;
        tables
            .links
            .entry(link.join_table)
            .or_default()
            .insert((link.owner_id, skill_id));
        Ok(())
    }

    async fn detach(&self, link: &SkillLink, skill_id: i32) -> AppResult<()> {
        let mut tables = self.tables()?;
        if let Some(pairs) = tables.links.get_mut(link.join_table) {
            pairs.remove(&(link.owner_id, skill_id));
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Location>> {
        Ok(self.tables()?.locations.values().cloned().collect())
    }
}

#[async_trait]
impl CategoryRepository for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        Ok(self.tables()?.categories.values().cloned().collect())
    }
}

#[async_trait]
impl CompanyProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: i32) -> AppResult<Option<CompanyProfile>> {
        let tables = self.tables()?;
        Ok(tables
            .profiles
            .values()
            .find(|profile| profile.user_id == user_id)
            .map(|profile| tables.hydrate_profile(profile)))
    }

    async fn save(&self, profile: &mut CompanyProfile) -> AppResult<()> {
        let mut tables = self.tables()?;
        let now = Utc::now();

        let existing = tables
            .profiles
            .values()
            .find(|current| current.user_id == profile.user_id)
            .map(|current| (current.id, current.created_at));

        match existing {
            Some((id, created_at)) => {
                profile.id = id;
                profile.created_at = created_at;
            }
            None => {
                profile.id = tables.next_id();
                profile.created_at = now;
            }
        }
        profile.updated_at = now;

        let mut stored = profile.clone();
        stored.skills.clear();
        stored.benefits.clear();
        tables.profiles.insert(stored.id, stored);
        Ok(())
    }
}

#[async_trait]
impl CompanyBenefitRepository for MemoryStore {
    async fn create(&self, benefit: &mut CompanyBenefit) -> AppResult<()> {
        let mut tables = self.tables()?;
        benefit.id = tables.next_id();
        tables.benefits.insert(benefit.id, benefit.clone());
        Ok(())
    }

    async fn update(&self, benefit: &CompanyBenefit) -> AppResult<()> {
        let mut tables = self.tables()?;
        match tables.benefits.get_mut(&benefit.id) {
            Some(current) => {
                *current = benefit.clone();
                Ok(())
            }
            None => Err(AppError::NotFound),
        }
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<CompanyBenefit>> {
        Ok(self.tables()?.benefits.get(&id).cloned())
    }

    async fn delete(&self, company_profile_id: i32, id: i32) -> AppResult<()> {
        let mut tables = self.tables()?;
        if tables
            .benefits
            .get(&id)
            .is_some_and(|benefit| benefit.company_profile_id == company_profile_id)
        {
            tables.benefits.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn create(&self, user: &mut User) -> AppResult<()> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|existing| existing.email == user.email) {
            return Err(ValidationError::EmailTaken.into());
        }

        let now = Utc::now();
        user.id = tables.next_id();
        user.created_at = now;
        user.updated_at = now;

        let mut stored = user.clone();
        stored.company_profile = None;
        tables.users.insert(stored.id, stored);
        Ok(())
    }

    async fn update(&self, user: &mut User) -> AppResult<()> {
        let mut tables = self.tables()?;
        let created_at = tables
            .users
            .get(&user.id)
            .map(|current| current.created_at)
            .ok_or(AppError::NotFound)?;

        user.created_at = created_at;
        user.updated_at = Utc::now();

        let mut stored = user.clone();
        stored.company_profile = None;
        tables.users.insert(stored.id, stored);
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.tables()?
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl PwResetRepository for MemoryStore {
    async fn create(&self, reset: &mut PwReset) -> AppResult<()> {
        let mut tables = self.tables()?;
        reset.id = tables.next_id();
        tables.pw_resets.insert(reset.id, reset.clone());
        Ok(())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> AppResult<Option<PwReset>> {
        Ok(self
            .tables()?
            .pw_resets
            .values()
            .find(|reset| reset.token_hash == token_hash)
            .cloned())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        self.tables()?.pw_resets.remove(&id);
        Ok(())
    }
}
