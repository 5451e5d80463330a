//! Payment database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Payment, PaymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub purchase_request_id: Option<i64>,
    pub cfo: String,
    pub status: String,
    pub request_status: Option<String>,
    pub planned_date: Option<Date>,
    pub actual_date: Option<Date>,
    pub executor_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(model: Model) -> Self {
        Payment {
            id: model.id,
            purchase_request_id: model.purchase_request_id,
            cfo: model.cfo,
            status: PaymentStatus::from(model.status.as_str()),
            request_status: model.request_status,
            planned_date: model.planned_date,
            actual_date: model.actual_date,
            executor_id: model.executor_id,
            responsible_id: model.responsible_id,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}
