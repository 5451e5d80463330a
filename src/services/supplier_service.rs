//! Supplier service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Supplier;
use crate::errors::{AppError, AppResult};
use crate::infra::{SupplierFilter, UnitOfWork};
use crate::types::PaginationParams;

/// Supplier service trait for dependency injection.
#[async_trait]
pub trait SupplierService: Send + Sync {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)>;

    async fn get_by_code(&self, code: &str) -> AppResult<Supplier>;

    async fn create(
        &self,
        code: String,
        name: String,
        inn: Option<String>,
        kpp: Option<String>,
    ) -> AppResult<Supplier>;

    /// Match against externally supplied tax identifiers.
    async fn match_by_tax_ids(&self, inn: String, kpp: Option<String>)
        -> AppResult<Option<Supplier>>;
}

/// Concrete implementation of SupplierService using Unit of Work.
pub struct SupplierManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SupplierManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> SupplierService for SupplierManager<U> {
    async fn list(
        &self,
        filter: SupplierFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Supplier>, u64)> {
        self.uow.suppliers().list(filter, params).await
    }

    async fn get_by_code(&self, code: &str) -> AppResult<Supplier> {
        self.uow
            .suppliers()
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(
        &self,
        code: String,
        name: String,
        inn: Option<String>,
        kpp: Option<String>,
    ) -> AppResult<Supplier> {
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(AppError::validation("Supplier code is required"));
        }
        self.uow.suppliers().create(code, name, inn, kpp).await
    }

    async fn match_by_tax_ids(
        &self,
        inn: String,
        kpp: Option<String>,
    ) -> AppResult<Option<Supplier>> {
        let inn = inn.trim().to_string();
        if inn.is_empty() {
            return Err(AppError::validation("INN is required for matching"));
        }
        self.uow.suppliers().match_by_tax_ids(&inn, kpp).await
    }
}
