//! Purchase request handlers, including the approvals subresource and the
//! request's CSI feedback view.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ApprovalResponse, CsiFeedbackResponse, PurchaseRequestResponse};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, Paginated, PaginationParams};

/// Request import payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportRequest {
    /// External-facing request identifier
    #[validate(length(min = 1, message = "Request id is required"))]
    #[schema(example = "PR-2025-000123")]
    pub id_purchase_request: String,
    /// Request subject line
    pub subject: Option<String>,
}

/// Approval stage assignment payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignApprovalRequest {
    /// Stage name
    #[validate(length(min = 1, message = "Stage is required"))]
    #[schema(example = "TECHNICAL_REVIEW")]
    pub stage: String,
    /// Responsible role
    #[validate(length(min = 1, message = "Role is required"))]
    #[schema(example = "CATEGORY_MANAGER")]
    pub role: String,
    /// Strategic-product flag
    #[serde(default)]
    pub strategic: bool,
}

/// Approval stage completion payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteApprovalRequest {
    #[validate(length(min = 1, message = "Stage is required"))]
    #[schema(example = "TECHNICAL_REVIEW")]
    pub stage: String,
    #[validate(length(min = 1, message = "Role is required"))]
    #[schema(example = "CATEGORY_MANAGER")]
    pub role: String,
    /// Free-text completion result
    #[schema(example = "Approved with remarks")]
    pub result: Option<String>,
}

/// Stage/role filters for the approvals listing
#[derive(Debug, Deserialize)]
pub struct ApprovalFilterParams {
    pub stage: Option<String>,
    pub role: Option<String>,
}

/// Create purchase request routes
pub fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(import_request))
        .route("/:external_id", get(get_request))
        .route(
            "/:external_id/approvals",
            get(list_approvals).post(assign_approval),
        )
        .route("/:external_id/approvals/complete", post(complete_approval))
        .route("/:external_id/csi", get(get_csi_feedback))
}

/// List purchase requests (paginated)
pub async fn list_requests(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<PurchaseRequestResponse>>> {
    let (page, per_page) = (params.page, params.per_page);
    let (requests, total) = state.request_service.list(params).await?;

    Ok(Json(Paginated::new(
        requests
            .into_iter()
            .map(PurchaseRequestResponse::from)
            .collect(),
        page,
        per_page,
        total,
    )))
}

/// Import a purchase request from the source system
#[utoipa::path(
    post,
    path = "/purchase-requests",
    tag = "Purchase requests",
    security(("bearer_auth" = [])),
    request_body = ImportRequest,
    responses(
        (status = 201, description = "Request imported", body = PurchaseRequestResponse),
        (status = 409, description = "Request id already exists")
    )
)]
pub async fn import_request(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ImportRequest>,
) -> AppResult<Created<PurchaseRequestResponse>> {
    let request = state
        .request_service
        .import(payload.id_purchase_request, payload.subject)
        .await?;

    Ok(Created(PurchaseRequestResponse::from(request)))
}

/// Get a purchase request by external id
#[utoipa::path(
    get,
    path = "/purchase-requests/{external_id}",
    tag = "Purchase requests",
    security(("bearer_auth" = [])),
    params(("external_id" = String, Path, description = "External request id")),
    responses(
        (status = 200, description = "Purchase request", body = PurchaseRequestResponse),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<Json<PurchaseRequestResponse>> {
    let request = state.request_service.get(&external_id).await?;
    Ok(Json(PurchaseRequestResponse::from(request)))
}

/// List approval records of a request, optionally filtered by stage/role
#[utoipa::path(
    get,
    path = "/purchase-requests/{external_id}/approvals",
    tag = "Approvals",
    security(("bearer_auth" = [])),
    params(
        ("external_id" = String, Path, description = "External request id"),
        ("stage" = Option<String>, Query, description = "Stage filter"),
        ("role" = Option<String>, Query, description = "Role filter")
    ),
    responses(
        (status = 200, description = "Approval records", body = Vec<ApprovalResponse>),
        (status = 404, description = "Request not found")
    )
)]
pub async fn list_approvals(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    Query(filter): Query<ApprovalFilterParams>,
) -> AppResult<Json<Vec<ApprovalResponse>>> {
    let approvals = state
        .approval_service
        .list(&external_id, filter.stage, filter.role)
        .await?;

    Ok(Json(
        approvals.into_iter().map(ApprovalResponse::from).collect(),
    ))
}

/// Assign an approval stage to a role
#[utoipa::path(
    post,
    path = "/purchase-requests/{external_id}/approvals",
    tag = "Approvals",
    security(("bearer_auth" = [])),
    request_body = AssignApprovalRequest,
    params(("external_id" = String, Path, description = "External request id")),
    responses(
        (status = 201, description = "Stage assigned", body = ApprovalResponse),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Stage already assigned to this role")
    )
)]
pub async fn assign_approval(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<AssignApprovalRequest>,
) -> AppResult<Created<ApprovalResponse>> {
    let approval = state
        .approval_service
        .assign(&external_id, payload.stage, payload.role, payload.strategic)
        .await?;

    Ok(Created(ApprovalResponse::from(approval)))
}

/// Complete an approval stage
#[utoipa::path(
    post,
    path = "/purchase-requests/{external_id}/approvals/complete",
    tag = "Approvals",
    security(("bearer_auth" = [])),
    request_body = CompleteApprovalRequest,
    params(("external_id" = String, Path, description = "External request id")),
    responses(
        (status = 200, description = "Stage completed", body = ApprovalResponse),
        (status = 400, description = "Stage already completed"),
        (status = 404, description = "Request or record not found")
    )
)]
pub async fn complete_approval(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CompleteApprovalRequest>,
) -> AppResult<Json<ApprovalResponse>> {
    let approval = state
        .approval_service
        .complete(&external_id, payload.stage, payload.role, payload.result)
        .await?;

    Ok(Json(ApprovalResponse::from(approval)))
}

/// CSI feedback recorded for a request
pub async fn get_csi_feedback(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<Json<CsiFeedbackResponse>> {
    let feedback = state
        .csi_service
        .for_request(&external_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(CsiFeedbackResponse::from(feedback)))
}
