//! Payment service.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{Payment, PaymentStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewPayment, PaymentFilter, UnitOfWork};
use crate::types::PaginationParams;

/// Payment service trait for dependency injection.
#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn list(
        &self,
        filter: PaymentFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Payment>, u64)>;

    async fn get(&self, id: i64) -> AppResult<Payment>;

    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    /// Update the payment status; `PAID` requires an actual date.
    async fn set_status(
        &self,
        id: i64,
        status: String,
        actual_date: Option<NaiveDate>,
    ) -> AppResult<Payment>;
}

/// Concrete implementation of PaymentService using Unit of Work.
pub struct PaymentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PaymentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PaymentService for PaymentManager<U> {
    async fn list(
        &self,
        filter: PaymentFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Payment>, u64)> {
        self.uow.payments().list(filter, params).await
    }

    async fn get(&self, id: i64) -> AppResult<Payment> {
        self.uow
            .payments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, payment: NewPayment) -> AppResult<Payment> {
        if payment.cfo.trim().is_empty() {
            return Err(AppError::validation("Cost center (CFO) is required"));
        }
        self.uow.payments().create(payment).await
    }

    async fn set_status(
        &self,
        id: i64,
        status: String,
        actual_date: Option<NaiveDate>,
    ) -> AppResult<Payment> {
        let status = PaymentStatus::parse(&status)
            .ok_or_else(|| AppError::validation(format!("Unknown payment status: {}", status)))?;

        if status == PaymentStatus::Paid && actual_date.is_none() {
            return Err(AppError::validation("Paid status requires an actual date"));
        }

        self.uow.payments().set_status(id, status, actual_date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockPaymentRepository;
    use crate::services::test_support::TestUnitOfWork;

    fn manager(payments: MockPaymentRepository) -> PaymentManager<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            payments: Some(Arc::new(payments)),
            ..Default::default()
        };
        PaymentManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn unknown_status_code_is_rejected() {
        let service = manager(MockPaymentRepository::new());

        let err = service
            .set_status(1, "paid".to_string(), None)
            .await
            .unwrap_err();

        // Codes are an exact-match table; lowercase does not parse
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn paid_requires_an_actual_date() {
        let service = manager(MockPaymentRepository::new());

        let err = service
            .set_status(1, "PAID".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_requires_a_cost_center() {
        let service = manager(MockPaymentRepository::new());

        let err = service
            .create(NewPayment {
                purchase_request_id: None,
                cfo: "  ".to_string(),
                status: PaymentStatus::Planned,
                request_status: None,
                planned_date: None,
                executor_id: None,
                responsible_id: None,
                comment: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }
}
