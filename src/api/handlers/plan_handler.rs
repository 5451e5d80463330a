//! Purchase plan handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{PlanItemResponse, PlanVersionResponse};
use crate::errors::AppResult;
use crate::types::Created;

use super::parse_months;

/// New plan version payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVersionRequest {
    /// Plan year
    #[validate(range(min = 2000, max = 2100, message = "Year is out of range"))]
    #[schema(example = 2025)]
    pub year: i32,
    /// Mark the new version as the year's current one
    #[serde(default)]
    pub make_current: bool,
}

/// New plan item payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    #[validate(range(min = 2000, max = 2100, message = "Year is out of range"))]
    #[schema(example = 2025)]
    pub year: i32,
    /// Purchase subject, unique per version (case-insensitive)
    #[validate(length(min = 1, message = "Subject is required"))]
    #[schema(example = "Office network equipment")]
    pub subject: String,
    /// Planned month, 1-12
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    #[schema(example = 6)]
    pub month: i16,
}

/// Purchaser assignment payload; null clears the assignment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignPurchaserRequest {
    /// New purchaser id, or null to clear
    pub purchaser_id: Option<i64>,
}

/// Year selector for version listings
#[derive(Debug, Deserialize)]
pub struct YearParams {
    pub year: i32,
}

/// Year + months selector for item listings
#[derive(Debug, Deserialize)]
pub struct ItemsParams {
    pub year: i32,
    /// Comma-separated months, e.g. `1,2,3`; empty means all
    pub months: Option<String>,
}

/// Create purchase plan routes
pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/versions", get(list_versions).post(create_version))
        .route("/items", get(list_items).post(create_item))
        .route("/items/:guid/purchaser", put(assign_purchaser))
}

/// List plan versions of a year
#[utoipa::path(
    get,
    path = "/purchase-plan/versions",
    tag = "Purchase plan",
    security(("bearer_auth" = [])),
    params(("year" = i32, Query, description = "Plan year")),
    responses(
        (status = 200, description = "Versions of the year", body = Vec<PlanVersionResponse>)
    )
)]
pub async fn list_versions(
    State(state): State<AppState>,
    Query(params): Query<YearParams>,
) -> AppResult<Json<Vec<PlanVersionResponse>>> {
    let versions = state.plan_service.list_versions(params.year).await?;
    Ok(Json(
        versions.into_iter().map(PlanVersionResponse::from).collect(),
    ))
}

/// Create the next plan version for a year
#[utoipa::path(
    post,
    path = "/purchase-plan/versions",
    tag = "Purchase plan",
    security(("bearer_auth" = [])),
    request_body = CreateVersionRequest,
    responses(
        (status = 201, description = "Version created", body = PlanVersionResponse)
    )
)]
pub async fn create_version(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateVersionRequest>,
) -> AppResult<Created<PlanVersionResponse>> {
    let version = state
        .plan_service
        .create_version(payload.year, payload.make_current)
        .await?;

    Ok(Created(PlanVersionResponse::from(version)))
}

/// List current-version items for a year and optional month set
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ItemsParams>,
) -> AppResult<Json<Vec<PlanItemResponse>>> {
    let months = parse_months(params.months.as_deref())?;
    let items = state
        .plan_service
        .items_for_months(params.year, months)
        .await?;

    Ok(Json(items.into_iter().map(PlanItemResponse::from).collect()))
}

/// Add an item to the year's current plan version
#[utoipa::path(
    post,
    path = "/purchase-plan/items",
    tag = "Purchase plan",
    security(("bearer_auth" = [])),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = PlanItemResponse),
        (status = 400, description = "No current version for the year"),
        (status = 409, description = "Subject already planned in this version")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> AppResult<Created<PlanItemResponse>> {
    let item = state
        .plan_service
        .create_item(payload.year, payload.subject, payload.month)
        .await?;

    Ok(Created(PlanItemResponse::from(item)))
}

/// Assign or clear an item's purchaser
#[utoipa::path(
    put,
    path = "/purchase-plan/items/{guid}/purchaser",
    tag = "Purchase plan",
    security(("bearer_auth" = [])),
    request_body = AssignPurchaserRequest,
    params(("guid" = Uuid, Path, description = "Plan item guid")),
    responses(
        (status = 200, description = "Rows affected; zero when unchanged"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn assign_purchaser(
    State(state): State<AppState>,
    Path(guid): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AssignPurchaserRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let rows = state
        .plan_service
        .assign_purchaser(guid, payload.purchaser_id)
        .await?;

    Ok(Json(serde_json::json!({ "rows_affected": rows })))
}
