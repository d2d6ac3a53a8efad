//! Job post database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::JobPost;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub location_id: i32,
    pub category_id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub apply_at: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity (skills are loaded separately)
impl From<Model> for JobPost {
    fn from(model: Model) -> Self {
        JobPost {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            location_id: model.location_id,
            category_id: model.category_id,
            description: model.description,
            apply_at: model.apply_at,
            skills: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
