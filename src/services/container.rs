//! Service container: centralized service construction and access.

use std::sync::Arc;

use super::{
    ApprovalManager, ApprovalService, AuthService, Authenticator, ContractManager,
    ContractService, CsiManager, CsiService, EmailDispatcher, EmailService, OverviewManager,
    OverviewService, PaymentManager, PaymentService, PlanManager, PlanService, RequestManager,
    RequestService, SupplierManager, SupplierService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{MailTransport, Persistence, SmtpMailer};

/// Concrete service container holding one instance of every service.
pub struct Services {
    auth: Arc<dyn AuthService>,
    users: Arc<dyn UserService>,
    requests: Arc<dyn RequestService>,
    approvals: Arc<dyn ApprovalService>,
    plans: Arc<dyn PlanService>,
    overview: Arc<dyn OverviewService>,
    payments: Arc<dyn PaymentService>,
    suppliers: Arc<dyn SupplierService>,
    contracts: Arc<dyn ContractService>,
    csi: Arc<dyn CsiService>,
    email: Arc<dyn EmailService>,
}

impl Services {
    /// Build every service from a database connection and configuration.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let transport: Arc<dyn MailTransport> = Arc::new(SmtpMailer::new(config.smtp.clone()));

        Self {
            auth: Arc::new(Authenticator::new(uow.clone(), config)),
            users: Arc::new(UserManager::new(uow.clone())),
            requests: Arc::new(RequestManager::new(uow.clone())),
            approvals: Arc::new(ApprovalManager::new(uow.clone())),
            plans: Arc::new(PlanManager::new(uow.clone())),
            overview: Arc::new(OverviewManager::new(uow.clone())),
            payments: Arc::new(PaymentManager::new(uow.clone())),
            suppliers: Arc::new(SupplierManager::new(uow.clone())),
            contracts: Arc::new(ContractManager::new(uow.clone())),
            csi: Arc::new(CsiManager::new(uow)),
            email: Arc::new(EmailDispatcher::new(transport)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    pub fn requests(&self) -> Arc<dyn RequestService> {
        self.requests.clone()
    }

    pub fn approvals(&self) -> Arc<dyn ApprovalService> {
        self.approvals.clone()
    }

    pub fn plans(&self) -> Arc<dyn PlanService> {
        self.plans.clone()
    }

    pub fn overview(&self) -> Arc<dyn OverviewService> {
        self.overview.clone()
    }

    pub fn payments(&self) -> Arc<dyn PaymentService> {
        self.payments.clone()
    }

    pub fn suppliers(&self) -> Arc<dyn SupplierService> {
        self.suppliers.clone()
    }

    pub fn contracts(&self) -> Arc<dyn ContractService> {
        self.contracts.clone()
    }

    pub fn csi(&self) -> Arc<dyn CsiService> {
        self.csi.clone()
    }

    pub fn email(&self) -> Arc<dyn EmailService> {
        self.email.clone()
    }
}

/// Parallel execution utilities for independent read operations.
pub mod parallel {
    use std::future::Future;

    use crate::errors::AppResult;

    /// Execute two independent async operations concurrently.
    ///
    /// If either operation fails, the error is returned immediately.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        tokio::try_join!(f1, f2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppResult;

    #[tokio::test]
    async fn join2_returns_both_results() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn join2_propagates_first_error() {
        async fn ok() -> AppResult<i32> {
            Ok(1)
        }
        async fn fail() -> AppResult<i32> {
            Err(crate::errors::AppError::NotFound)
        }

        assert!(parallel::join2(ok(), fail()).await.is_err());
    }
}
