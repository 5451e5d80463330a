//! Supplier repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::supplier::{self, Entity as SupplierEntity};
use super::map_insert_err;
use crate::domain::Supplier;
use crate::errors::AppResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Filters for the supplier listing; present fields combine with AND.
#[derive(Debug, Clone, Default)]
pub struct SupplierFilter {
    pub code: Option<String>,
    /// Substring match on the name
    pub name: Option<String>,
    pub inn: Option<String>,
    pub kpp: Option<String>,
}

/// Supplier repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Supplier>>;

    /// Create a supplier. Duplicate codes conflict.
    async fn create(
        &self,
        code: String,
        name: String,
        inn: Option<String>,
        kpp: Option<String>,
    ) -> AppResult<Supplier>;

    /// Match a supplier against externally supplied tax identifiers:
    /// exact inn+kpp first, then inn alone.
    async fn match_by_tax_ids(&self, inn: &str, kpp: Option<String>)
        -> AppResult<Option<Supplier>>;
}

/// SeaORM-backed implementation of `SupplierRepository`
pub struct SupplierStore {
    db: DatabaseConnection,
}

impl SupplierStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SupplierRepository for SupplierStore {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)> {
        let mut query = SupplierEntity::find();

        if let Some(code) = filter.code {
            query = query.filter(supplier::Column::Code.eq(code));
        }
        if let Some(name) = filter.name {
            query = query.filter(supplier::Column::Name.contains(&name));
        }
        if let Some(inn) = filter.inn {
            query = query.filter(supplier::Column::Inn.eq(inn));
        }
        if let Some(kpp) = filter.kpp {
            query = query.filter(supplier::Column::Kpp.eq(kpp));
        }

        let paginator = query
            .order_by_asc(supplier::Column::Code)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Supplier::from).collect(), total))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Supplier>> {
        let model = SupplierEntity::find()
            .filter(supplier::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(Supplier::from))
    }

    async fn create(
        &self,
        code: String,
        name: String,
        inn: Option<String>,
        kpp: Option<String>,
    ) -> AppResult<Supplier> {
        let active = supplier::ActiveModel {
            code: Set(code),
            name: Set(name),
            inn: Set(inn),
            kpp: Set(kpp),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Supplier", e))?;
        Ok(Supplier::from(model))
    }

    async fn match_by_tax_ids(
        &self,
        inn: &str,
        kpp: Option<String>,
    ) -> AppResult<Option<Supplier>> {
        if let Some(kpp) = kpp {
            let exact = SupplierEntity::find()
                .filter(supplier::Column::Inn.eq(inn))
                .filter(supplier::Column::Kpp.eq(kpp))
                .one(&self.db)
                .await?;
            if let Some(model) = exact {
                return Ok(Some(Supplier::from(model)));
            }
        }

        let by_inn = SupplierEntity::find()
            .filter(supplier::Column::Inn.eq(inn))
            .one(&self.db)
            .await?;
        Ok(by_inn.map(Supplier::from))
    }
}
