//! Reference entities: skills, locations and categories.

use serde::{Deserialize, Serialize};

/// A skill referenced by job posts and company profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    #[serde(default)]
    pub skill_name: String,
}

impl Skill {
    pub fn new(id: i32, skill_name: impl Into<String>) -> Self {
        Self {
            id,
            skill_name: skill_name.into(),
        }
    }

    /// Reference to an existing skill by identity only.
    pub fn with_id(id: i32) -> Self {
        Self {
            id,
            skill_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i32,
    pub location_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i32,
    pub category_name: String,
}
