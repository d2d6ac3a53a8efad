//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CompanyProfile;
use crate::config::ROLE_USER_ID;

/// User domain entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role_id: i32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub company_profile: Option<CompanyProfile>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

/// Signup input: plain-text password, hashed before persistence.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role_id: i32,
}

fn default_role() -> i32 {
    ROLE_USER_ID
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role_id: ROLE_USER_ID,
        }
    }
}

/// Pending password reset. Only the keyed hash of the token is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PwReset {
    pub id: i32,
    pub user_id: i32,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}
