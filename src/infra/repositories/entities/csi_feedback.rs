//! CSI feedback database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CsiFeedback;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "csi_feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// One feedback row per request (and so per survey token)
    #[sea_orm(unique)]
    pub purchase_request_id: i64,
    pub rating: i16,
    pub comment: Option<String>,
    pub submitted_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CsiFeedback {
    fn from(model: Model) -> Self {
        CsiFeedback {
            id: model.id,
            purchase_request_id: model.purchase_request_id,
            rating: model.rating,
            comment: model.comment,
            submitted_at: model.submitted_at,
        }
    }
}
