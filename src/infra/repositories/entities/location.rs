use sea_orm::entity::prelude::*;

use crate::domain::Location;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub location_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Location {
    fn from(model: Model) -> Self {
        Location {
            id: model.id,
            location_name: model.location_name,
        }
    }
}
