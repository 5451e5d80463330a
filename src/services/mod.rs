//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and use the Unit of Work for repository access.

mod approval_service;
mod auth_service;
pub mod container;
mod contract_service;
mod csi_service;
mod email_service;
mod overview_service;
mod payment_service;
mod plan_service;
mod request_service;
mod supplier_service;
mod user_service;

pub use container::{parallel, Services};

pub use approval_service::{ApprovalManager, ApprovalService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use contract_service::{ContractIngest, ContractManager, ContractService};
pub use csi_service::{CsiManager, CsiService};
pub use email_service::{is_valid_address, EmailDispatcher, EmailService};
pub use overview_service::{OverviewManager, OverviewService};
pub use payment_service::{PaymentManager, PaymentService};
pub use plan_service::{PlanManager, PlanService};
pub use request_service::{RequestManager, RequestService};
pub use supplier_service::{SupplierManager, SupplierService};
pub use user_service::{UserManager, UserService};

#[cfg(test)]
pub(crate) mod test_support {
    //! Unit-of-Work stub assembled from individual mock repositories.
    //!
    //! Accessors panic when the test did not wire the repository it needs;
    //! the transaction API is unsupported here, mock at the service level
    //! or use integration tests for transactional flows.

    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::errors::{AppError, AppResult};
    use crate::infra::{
        ApprovalRepository, ContractRepository, CsiRepository, MockApprovalRepository,
        MockContractRepository, MockCsiRepository, MockPaymentRepository, MockPlanRepository,
        MockPurchaseRequestRepository, MockSupplierRepository, MockUserRepository,
        PaymentRepository, PlanRepository, PurchaseRequestRepository, SupplierRepository,
        TransactionContext, UnitOfWork, UserRepository,
    };

    #[derive(Default)]
    pub struct TestUnitOfWork {
        pub users: Option<Arc<MockUserRepository>>,
        pub requests: Option<Arc<MockPurchaseRequestRepository>>,
        pub approvals: Option<Arc<MockApprovalRepository>>,
        pub plans: Option<Arc<MockPlanRepository>>,
        pub payments: Option<Arc<MockPaymentRepository>>,
        pub suppliers: Option<Arc<MockSupplierRepository>>,
        pub contracts: Option<Arc<MockContractRepository>>,
        pub csi: Option<Arc<MockCsiRepository>>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone().expect("users mock not wired")
        }

        fn requests(&self) -> Arc<dyn PurchaseRequestRepository> {
            self.requests.clone().expect("requests mock not wired")
        }

        fn approvals(&self) -> Arc<dyn ApprovalRepository> {
            self.approvals.clone().expect("approvals mock not wired")
        }

        fn plans(&self) -> Arc<dyn PlanRepository> {
            self.plans.clone().expect("plans mock not wired")
        }

        fn payments(&self) -> Arc<dyn PaymentRepository> {
            self.payments.clone().expect("payments mock not wired")
        }

        fn suppliers(&self) -> Arc<dyn SupplierRepository> {
            self.suppliers.clone().expect("suppliers mock not wired")
        }

        fn contracts(&self) -> Arc<dyn ContractRepository> {
            self.contracts.clone().expect("contracts mock not wired")
        }

        fn csi(&self) -> Arc<dyn CsiRepository> {
            self.csi.clone().expect("csi mock not wired")
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test stub"))
        }
    }
}
