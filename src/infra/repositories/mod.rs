//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

use sea_orm::{DbErr, SqlErr};

use crate::errors::AppError;

pub(crate) mod entities;

mod approval_repository;
mod contract_repository;
mod csi_repository;
mod payment_repository;
mod plan_repository;
mod request_repository;
mod supplier_repository;
mod user_repository;

pub use approval_repository::{ApprovalRepository, ApprovalStore};
pub use contract_repository::{ContractRepository, ContractStore, NewContract};
pub use csi_repository::{CsiRepository, CsiStore};
pub use payment_repository::{NewPayment, PaymentFilter, PaymentRepository, PaymentStore, SortDir};
pub use plan_repository::{next_version_number, PlanRepository, PlanStore};
pub use request_repository::{PurchaseRequestRepository, PurchaseRequestStore};
pub use supplier_repository::{SupplierFilter, SupplierRepository, SupplierStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use approval_repository::MockApprovalRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use contract_repository::MockContractRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use csi_repository::MockCsiRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use payment_repository::MockPaymentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use plan_repository::MockPlanRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use request_repository::MockPurchaseRequestRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use supplier_repository::MockSupplierRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Map an insert error so uniqueness violations become domain conflicts
/// instead of opaque database failures.
pub(crate) fn map_insert_err(entity: &str, e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(entity),
        _ => AppError::from(e),
    }
}
