//! Payment handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{PaymentResponse, PaymentStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::{NewPayment, PaymentFilter, SortDir};
use crate::types::{Created, Paginated, PaginationParams};

/// Payment listing query: pagination plus filters and ordering.
///
/// Pagination fields are spelled out because `serde(flatten)` does not
/// survive query-string deserialization for numeric fields.
#[derive(Debug, Deserialize)]
pub struct PaymentListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub cfo: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub linked_only: bool,
}

impl PaymentListParams {
    fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            per_page: self.per_page.unwrap_or(defaults.per_page),
        }
    }
}

/// New payment payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    /// Linked purchase request id
    pub purchase_request_id: Option<i64>,
    /// Cost-center code
    #[validate(length(min = 1, message = "CFO is required"))]
    #[schema(example = "CFO-IT")]
    pub cfo: String,
    /// Status mirrored from the linked request
    pub request_status: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub executor_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub comment: Option<String>,
}

/// Status update payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentStatusRequest {
    /// New status code
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "PAID")]
    pub status: String,
    /// Actual payment date, required for PAID
    pub actual_date: Option<NaiveDate>,
}

/// Create payment routes
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", get(get_payment))
        .route("/:id/status", put(update_payment_status))
}

/// List payments with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number"),
        ("per_page" = Option<u64>, Query, description = "Page size"),
        ("sort_by" = Option<String>, Query, description = "planned_date | actual_date | status | cfo"),
        ("sort_dir" = Option<String>, Query, description = "asc | desc"),
        ("cfo" = Option<String>, Query, description = "Cost-center filter"),
        ("comment" = Option<String>, Query, description = "Comment substring filter"),
        ("linked_only" = Option<bool>, Query, description = "Only payments with a linked request")
    ),
    responses((status = 200, description = "Paginated payments"))
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> AppResult<Json<Paginated<PaymentResponse>>> {
    let pagination = params.pagination();
    let filter = PaymentFilter {
        cfo: params.cfo,
        comment: params.comment,
        linked_only: params.linked_only,
        sort_by: params.sort_by,
        sort_desc: matches!(
            params.sort_dir.as_deref().map(SortDir::parse),
            Some(SortDir::Desc)
        ),
    };

    let (page, per_page) = (pagination.page, pagination.per_page);
    let (payments, total) = state.payment_service.list(filter, pagination).await?;

    Ok(Json(Paginated::new(
        payments.into_iter().map(PaymentResponse::from).collect(),
        page,
        per_page,
        total,
    )))
}

/// Get a payment by id
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentResponse>> {
    let payment = state.payment_service.get(id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// Register a payment
#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses((status = 201, description = "Payment created", body = PaymentResponse))
)]
pub async fn create_payment(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePaymentRequest>,
) -> AppResult<Created<PaymentResponse>> {
    let payment = state
        .payment_service
        .create(NewPayment {
            purchase_request_id: payload.purchase_request_id,
            cfo: payload.cfo,
            status: PaymentStatus::Planned,
            request_status: payload.request_status,
            planned_date: payload.planned_date,
            executor_id: payload.executor_id,
            responsible_id: payload.responsible_id,
            comment: payload.comment,
        })
        .await?;

    Ok(Created(PaymentResponse::from(payment)))
}

/// Update a payment's status
#[utoipa::path(
    put,
    path = "/payments/{id}/status",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = UpdatePaymentStatusRequest,
    params(("id" = i64, Path, description = "Payment id")),
    responses(
        (status = 200, description = "Updated payment", body = PaymentResponse),
        (status = 400, description = "Unknown status or missing actual date"),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdatePaymentStatusRequest>,
) -> AppResult<Json<PaymentResponse>> {
    if id <= 0 {
        return Err(AppError::BadRequest("Invalid payment id".to_string()));
    }

    let payment = state
        .payment_service
        .set_status(id, payload.status, payload.actual_date)
        .await?;

    Ok(Json(PaymentResponse::from(payment)))
}
