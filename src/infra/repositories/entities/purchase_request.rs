//! Purchase request database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{PurchaseRequest, RequestStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "purchase_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// External-facing identifier from the source system
    #[sea_orm(unique)]
    pub external_id: String,
    pub subject: Option<String>,
    pub status: String,
    #[sea_orm(unique)]
    pub csi_token: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PurchaseRequest {
    fn from(model: Model) -> Self {
        PurchaseRequest {
            id: model.id,
            external_id: model.external_id,
            subject: model.subject,
            status: RequestStatus::from(model.status.as_str()),
            csi_token: model.csi_token,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
