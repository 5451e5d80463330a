//! Plan version database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::PlanVersion;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plan_versions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub year: i32,
    pub version_number: i32,
    pub is_current: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PlanVersion {
    fn from(model: Model) -> Self {
        PlanVersion {
            id: model.id,
            year: model.year,
            version_number: model.version_number,
            is_current: model.is_current,
            created_at: model.created_at,
        }
    }
}
