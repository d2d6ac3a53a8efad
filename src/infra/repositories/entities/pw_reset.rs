use sea_orm::entity::prelude::*;

use crate::domain::PwReset;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pw_resets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    #[sea_orm(unique)]
    pub token_hash: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PwReset {
    fn from(model: Model) -> Self {
        PwReset {
            id: model.id,
            user_id: model.user_id,
            token_hash: model.token_hash,
            created_at: model.created_at,
        }
    }
}
