//! Approval record database entity for SeaORM.
//!
//! Uniqueness of (purchase_request_id, stage, role) is a composite index on
//! the table; duplicate inserts surface as constraint violations.

use sea_orm::entity::prelude::*;

use crate::domain::Approval;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_approvals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub purchase_request_id: i64,
    pub stage: String,
    pub role: String,
    pub strategic: bool,
    pub assigned_at: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
    pub result: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Approval {
    fn from(model: Model) -> Self {
        Approval {
            id: model.id,
            purchase_request_id: model.purchase_request_id,
            stage: model.stage,
            role: model.role,
            strategic: model.strategic,
            assigned_at: model.assigned_at,
            completed_at: model.completed_at,
            result: model.result,
        }
    }
}
