//! Contract database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Contract;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub number: String,
    pub supplier_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub amount: Option<f64>,
    pub concluded_at: Option<Date>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Contract {
    fn from(model: Model) -> Self {
        Contract {
            id: model.id,
            number: model.number,
            supplier_id: model.supplier_id,
            purchase_request_id: model.purchase_request_id,
            subject: model.subject,
            amount: model.amount,
            concluded_at: model.concluded_at,
            created_at: model.created_at,
        }
    }
}
