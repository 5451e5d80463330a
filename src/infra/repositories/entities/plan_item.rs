//! Plan item database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::PlanItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plan_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub guid: Uuid,
    pub year: i32,
    pub version_id: i64,
    pub subject: String,
    pub month: i16,
    pub purchaser_id: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PlanItem {
    fn from(model: Model) -> Self {
        PlanItem {
            id: model.id,
            guid: model.guid,
            year: model.year,
            version_id: model.version_id,
            subject: model.subject,
            month: model.month,
            purchaser_id: model.purchaser_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
