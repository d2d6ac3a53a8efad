use sea_orm::entity::prelude::*;

use crate::domain::CompanyBenefit;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_benefits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub company_profile_id: i32,
    pub benefit_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CompanyBenefit {
    fn from(model: Model) -> Self {
        CompanyBenefit {
            id: model.id,
            company_profile_id: model.company_profile_id,
            benefit_name: model.benefit_name,
        }
    }
}
