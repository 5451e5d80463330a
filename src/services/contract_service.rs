//! Contract service.
//!
//! On ingest the supplier link is resolved by matching the externally
//! supplied tax identifiers against the supplier registry, and the request
//! link by external request id.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::Contract;
use crate::errors::{AppError, AppResult};
use crate::infra::{NewContract, UnitOfWork};
use crate::types::PaginationParams;

/// Externally supplied contract data before link resolution
#[derive(Debug, Clone)]
pub struct ContractIngest {
    pub number: String,
    pub inn: Option<String>,
    pub kpp: Option<String>,
    pub external_request_id: Option<String>,
    pub subject: Option<String>,
    pub amount: Option<f64>,
    pub concluded_at: Option<NaiveDate>,
}

/// Contract service trait for dependency injection.
#[async_trait]
pub trait ContractService: Send + Sync {
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Contract>, u64)>;

    async fn get(&self, id: i64) -> AppResult<Contract>;

    async fn ingest(&self, data: ContractIngest) -> AppResult<Contract>;
}

/// Concrete implementation of ContractService using Unit of Work.
pub struct ContractManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ContractManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ContractService for ContractManager<U> {
    async fn list(&self, params: PaginationParams) -> AppResult<(Vec<Contract>, u64)> {
        self.uow.contracts().list_paginated(params).await
    }

    async fn get(&self, id: i64) -> AppResult<Contract> {
        self.uow
            .contracts()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn ingest(&self, data: ContractIngest) -> AppResult<Contract> {
        let number = data.number.trim().to_string();
        if number.is_empty() {
            return Err(AppError::validation("Contract number is required"));
        }

        // Supplier link via inn/kpp matching; a miss is not an error
        let supplier_id = match &data.inn {
            Some(inn) if !inn.trim().is_empty() => self
                .uow
                .suppliers()
                .match_by_tax_ids(inn.trim(), data.kpp.clone())
                .await?
                .map(|s| s.id),
            _ => None,
        };

        let purchase_request_id = match &data.external_request_id {
            Some(external_id) => self
                .uow
                .requests()
                .find_by_external_id(external_id)
                .await?
                .map(|r| r.id),
            None => None,
        };

        let contract = self
            .uow
            .contracts()
            .create(NewContract {
                number,
                supplier_id,
                purchase_request_id,
                subject: data.subject,
                amount: data.amount,
                concluded_at: data.concluded_at,
            })
            .await?;

        tracing::info!(
            number = %contract.number,
            supplier_matched = contract.supplier_id.is_some(),
            "Contract ingested"
        );
        Ok(contract)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::Supplier;
    use crate::infra::{
        MockContractRepository, MockPurchaseRequestRepository, MockSupplierRepository,
    };
    use crate::services::test_support::TestUnitOfWork;

    fn ingest_data(number: &str, inn: Option<&str>) -> ContractIngest {
        ContractIngest {
            number: number.to_string(),
            inn: inn.map(|s| s.to_string()),
            kpp: None,
            external_request_id: None,
            subject: None,
            amount: Some(125_000.0),
            concluded_at: None,
        }
    }

    #[tokio::test]
    async fn ingest_links_supplier_matched_by_inn() {
        let mut suppliers = MockSupplierRepository::new();
        suppliers.expect_match_by_tax_ids().returning(|inn, _| {
            Ok(Some(Supplier {
                id: 7,
                code: "SUP-7".to_string(),
                name: "Matched".to_string(),
                inn: Some(inn.to_string()),
                kpp: None,
                created_at: Utc::now(),
            }))
        });

        let mut contracts = MockContractRepository::new();
        contracts
            .expect_create()
            .withf(|new| new.supplier_id == Some(7))
            .returning(|new| {
                Ok(Contract {
                    id: 1,
                    number: new.number,
                    supplier_id: new.supplier_id,
                    purchase_request_id: new.purchase_request_id,
                    subject: new.subject,
                    amount: new.amount,
                    concluded_at: new.concluded_at,
                    created_at: Utc::now(),
                })
            });

        let uow = TestUnitOfWork {
            suppliers: Some(Arc::new(suppliers)),
            contracts: Some(Arc::new(contracts)),
            requests: Some(Arc::new(MockPurchaseRequestRepository::new())),
            ..Default::default()
        };
        let service = ContractManager::new(Arc::new(uow));

        let contract = service
            .ingest(ingest_data("D-2025/117", Some("7707083893")))
            .await
            .unwrap();

        assert_eq!(contract.supplier_id, Some(7));
    }

    #[tokio::test]
    async fn ingest_without_tax_ids_leaves_supplier_unlinked() {
        let mut contracts = MockContractRepository::new();
        contracts
            .expect_create()
            .withf(|new| new.supplier_id.is_none())
            .returning(|new| {
                Ok(Contract {
                    id: 2,
                    number: new.number,
                    supplier_id: None,
                    purchase_request_id: None,
                    subject: None,
                    amount: new.amount,
                    concluded_at: None,
                    created_at: Utc::now(),
                })
            });

        let uow = TestUnitOfWork {
            contracts: Some(Arc::new(contracts)),
            suppliers: Some(Arc::new(MockSupplierRepository::new())),
            requests: Some(Arc::new(MockPurchaseRequestRepository::new())),
            ..Default::default()
        };
        let service = ContractManager::new(Arc::new(uow));

        let contract = service.ingest(ingest_data("D-2025/118", None)).await.unwrap();
        assert!(contract.supplier_id.is_none());
    }

    #[tokio::test]
    async fn ingest_requires_a_number() {
        let uow = TestUnitOfWork::default();
        let service = ContractManager::new(Arc::new(uow));

        let err = service.ingest(ingest_data("  ", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
