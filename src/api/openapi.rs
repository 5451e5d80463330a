//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, contract_handler, csi_handler, email_handler, overview_handler, payment_handler,
    plan_handler, request_handler, supplier_handler, user_handler,
};
use crate::domain::{
    ApprovalResponse, ContractResponse, CsiFeedbackResponse, Overview, PaymentResponse,
    PlanItemResponse, PlanVersionResponse, PurchaseRequestResponse, SlaStat, SupplierResponse,
    UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the procurement service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Procurement Management API",
        version = "0.1.0",
        description = "Purchase requests, approvals, plan versioning, payments, suppliers, contracts and CSI feedback",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        user_handler::get_current_user,
        user_handler::list_users,
        user_handler::update_user,
        request_handler::import_request,
        request_handler::get_request,
        request_handler::list_approvals,
        request_handler::assign_approval,
        request_handler::complete_approval,
        plan_handler::list_versions,
        plan_handler::create_version,
        plan_handler::create_item,
        plan_handler::assign_purchaser,
        overview_handler::get_overview,
        overview_handler::get_sla,
        overview_handler::get_plan_months,
        payment_handler::list_payments,
        payment_handler::create_payment,
        payment_handler::update_payment_status,
        supplier_handler::list_suppliers,
        supplier_handler::create_supplier,
        supplier_handler::match_supplier,
        contract_handler::ingest_contract,
        csi_handler::submit_feedback,
        email_handler::send_test_email,
        email_handler::send_feedback,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            TokenResponse,
            MessageResponse,
            PurchaseRequestResponse,
            ApprovalResponse,
            PlanVersionResponse,
            PlanItemResponse,
            Overview,
            SlaStat,
            PaymentResponse,
            SupplierResponse,
            ContractResponse,
            CsiFeedbackResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            user_handler::UpdateUserRequest,
            request_handler::ImportRequest,
            request_handler::AssignApprovalRequest,
            request_handler::CompleteApprovalRequest,
            plan_handler::CreateVersionRequest,
            plan_handler::CreateItemRequest,
            plan_handler::AssignPurchaserRequest,
            payment_handler::CreatePaymentRequest,
            payment_handler::UpdatePaymentStatusRequest,
            supplier_handler::CreateSupplierRequest,
            contract_handler::IngestContractRequest,
            csi_handler::SubmitFeedbackRequest,
            email_handler::TestEmailRequest,
            email_handler::SendFeedbackRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and registration"),
        (name = "Users", description = "User management"),
        (name = "Purchase requests", description = "Request import and lookup"),
        (name = "Approvals", description = "Approval stage tracking"),
        (name = "Purchase plan", description = "Plan versions and items"),
        (name = "Overview", description = "Aggregated read models"),
        (name = "Payments", description = "Payment tracking"),
        (name = "Suppliers", description = "Supplier registry"),
        (name = "Contracts", description = "Contract ingest"),
        (name = "CSI", description = "Satisfaction surveys"),
        (name = "Email", description = "Outgoing notifications")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
