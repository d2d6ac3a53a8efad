//! Owner capabilities.
//!
//! The relationship manager never inspects concrete owner types. An owner
//! opts in by exposing its skill set (`HasSkills`) or benefit list
//! (`HasBenefits`), and describes where its skill associations live through
//! a `SkillLink`.

use super::{CompanyBenefit, Skill};

/// Location of an owner's skill associations in the join storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillLink {
    /// Join table holding (owner, skill) pairs
    pub join_table: &'static str,
    /// Column referencing the owner
    pub owner_column: &'static str,
    /// Identity of the owner
    pub owner_id: i32,
}

/// An entity that holds a set of skills, unique by skill identity.
pub trait HasSkills: Send {
    /// Where this owner's skill associations are stored.
    fn skill_link(&self) -> SkillLink;

    fn skills(&self) -> &[Skill];

    fn skills_mut(&mut self) -> &mut Vec<Skill>;

    fn has_skill(&self, skill_id: i32) -> bool {
        self.skills().iter().any(|skill| skill.id == skill_id)
    }
}

/// An entity that owns an ordered list of company benefits.
pub trait HasBenefits: Send {
    /// Identity benefits are attached to.
    fn benefit_owner_id(&self) -> i32;

    fn benefits(&self) -> &[CompanyBenefit];

    fn benefits_mut(&mut self) -> &mut Vec<CompanyBenefit>;
}
