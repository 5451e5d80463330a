//! Contract repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::entities::contract::{self, Entity as ContractEntity};
use super::map_insert_err;
use crate::domain::Contract;
use crate::errors::AppResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// New contract fields; the supplier link is resolved by the service
/// through inn/kpp matching before the insert.
#[derive(Debug, Clone)]
pub struct NewContract {
    pub number: String,
    pub supplier_id: Option<i64>,
    pub purchase_request_id: Option<i64>,
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub concluded_at: Option<NaiveDate>,
}

/// Contract repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    async fn list_paginated(&self, params: PaginationParams) -> AppResult<(Vec<Contract>, u64)>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Contract>>;

    /// Create a contract. Duplicate numbers conflict.
    async fn create(&self, contract: NewContract) -> AppResult<Contract>;
}

/// SeaORM-backed implementation of `ContractRepository`
pub struct ContractStore {
    db: DatabaseConnection,
}

impl ContractStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContractRepository for ContractStore {
    async fn list_paginated(&self, params: PaginationParams) -> AppResult<(Vec<Contract>, u64)> {
        let paginator = ContractEntity::find()
            .order_by_desc(contract::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Contract::from).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Contract>> {
        let model = ContractEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Contract::from))
    }

    async fn create(&self, new: NewContract) -> AppResult<Contract> {
        let active = contract::ActiveModel {
            number: Set(new.number),
            supplier_id: Set(new.supplier_id),
            purchase_request_id: Set(new.purchase_request_id),
            subject: Set(new.subject),
            amount: Set(new.amount),
            concluded_at: Set(new.concluded_at),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Contract", e))?;
        Ok(Contract::from(model))
    }
}
