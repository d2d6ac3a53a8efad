//! Company profile database entity. One row per user.

use sea_orm::entity::prelude::*;

use crate::domain::CompanyProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub website: String,
    pub founded_year: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub company_logo_url: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Skills and benefits are loaded separately
impl From<Model> for CompanyProfile {
    fn from(model: Model) -> Self {
        CompanyProfile {
            id: model.id,
            user_id: model.user_id,
            website: model.website,
            founded_year: model.founded_year,
            description: model.description,
            company_logo_url: model.company_logo_url,
            skills: Vec::new(),
            benefits: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
