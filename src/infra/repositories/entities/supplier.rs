//! Supplier database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Supplier;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Supplier {
    fn from(model: Model) -> Self {
        Supplier {
            id: model.id,
            code: model.code,
            name: model.name,
            inn: model.inn,
            kpp: model.kpp,
            created_at: model.created_at,
        }
    }
}
