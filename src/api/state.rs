//! Application state - Dependency injection container for handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    ApprovalService, AuthService, ContractService, CsiService, EmailService, OverviewService,
    PaymentService, PlanService, RequestService, Services, SupplierService, UserService,
};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub request_service: Arc<dyn RequestService>,
    pub approval_service: Arc<dyn ApprovalService>,
    pub plan_service: Arc<dyn PlanService>,
    pub overview_service: Arc<dyn OverviewService>,
    pub payment_service: Arc<dyn PaymentService>,
    pub supplier_service: Arc<dyn SupplierService>,
    pub contract_service: Arc<dyn ContractService>,
    pub csi_service: Arc<dyn CsiService>,
    pub email_service: Arc<dyn EmailService>,
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            request_service: services.requests(),
            approval_service: services.approvals(),
            plan_service: services.plans(),
            overview_service: services.overview(),
            payment_service: services.payments(),
            supplier_service: services.suppliers(),
            contract_service: services.contracts(),
            csi_service: services.csi(),
            email_service: services.email(),
            database,
        }
    }
}
