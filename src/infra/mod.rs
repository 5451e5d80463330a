//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Unit of Work for transaction management
//! - SMTP mail transport

pub mod db;
pub mod mailer;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use mailer::{MailTransport, OutgoingEmail, SmtpMailer};
pub use repositories::{
    ApprovalRepository, ApprovalStore, ContractRepository, ContractStore, CsiRepository, CsiStore,
    NewContract, NewPayment, PaymentFilter, PaymentRepository, PaymentStore, PlanRepository,
    PlanStore, PurchaseRequestRepository, PurchaseRequestStore, SortDir, SupplierFilter,
    SupplierRepository, SupplierStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxApprovalRepository, TxRequestRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use mailer::MockMailTransport;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockApprovalRepository, MockContractRepository, MockCsiRepository, MockPaymentRepository,
    MockPlanRepository, MockPurchaseRequestRepository, MockSupplierRepository, MockUserRepository,
};
