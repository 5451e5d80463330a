//! Purchase request service.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::PurchaseRequest;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::PaginationParams;

/// Purchase request service trait for dependency injection.
#[async_trait]
pub trait RequestService: Send + Sync {
    /// Import a request from the source system
    async fn import(&self, external_id: String, subject: Option<String>)
        -> AppResult<PurchaseRequest>;

    async fn get(&self, external_id: &str) -> AppResult<PurchaseRequest>;

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<PurchaseRequest>, u64)>;
}

/// Concrete implementation of RequestService using Unit of Work.
pub struct RequestManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RequestManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestService for RequestManager<U> {
    async fn import(
        &self,
        external_id: String,
        subject: Option<String>,
    ) -> AppResult<PurchaseRequest> {
        let external_id = external_id.trim().to_string();
        if external_id.is_empty() {
            return Err(AppError::validation("Request id is required"));
        }

        let request = self.uow.requests().create(external_id, subject).await?;
        tracing::info!(external_id = %request.external_id, "Purchase request imported");
        Ok(request)
    }

    async fn get(&self, external_id: &str) -> AppResult<PurchaseRequest> {
        self.uow
            .requests()
            .find_by_external_id(external_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<PurchaseRequest>, u64)> {
        self.uow.requests().list_paginated(&params).await
    }
}
