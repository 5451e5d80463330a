//! Overview aggregation handlers.

use axum::{extract::{Query, State}, response::Json, routing::get, Router};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{Overview, PlanItemResponse, SlaStat};
use crate::errors::AppResult;

use super::parse_months;

/// Year selector
#[derive(Debug, Deserialize)]
pub struct SlaParams {
    pub year: i32,
}

/// Year + months selector
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    pub year: i32,
    /// Comma-separated months, e.g. `1,2,3`
    pub months: Option<String>,
}

/// Create overview routes
pub fn overview_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_overview))
        .route("/sla", get(get_sla))
        .route("/purchase-plan-months", get(get_plan_months))
}

/// SLA statistics by request status group for a year
#[utoipa::path(
    get,
    path = "/overview/sla",
    tag = "Overview",
    security(("bearer_auth" = [])),
    params(("year" = i32, Query, description = "Request year")),
    responses((status = 200, description = "SLA statistics", body = Vec<SlaStat>))
)]
pub async fn get_sla(
    State(state): State<AppState>,
    Query(params): Query<SlaParams>,
) -> AppResult<Json<Vec<SlaStat>>> {
    let stats = state.overview_service.sla(params.year).await?;
    Ok(Json(stats))
}

/// Current-version plan items for selected months
#[utoipa::path(
    get,
    path = "/overview/purchase-plan-months",
    tag = "Overview",
    security(("bearer_auth" = [])),
    params(
        ("year" = i32, Query, description = "Plan year"),
        ("months" = Option<String>, Query, description = "Comma-separated months")
    ),
    responses((status = 200, description = "Plan items", body = Vec<PlanItemResponse>))
)]
pub async fn get_plan_months(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<Json<Vec<PlanItemResponse>>> {
    let months = parse_months(params.months.as_deref())?;
    let items = state
        .overview_service
        .plan_months(params.year, months)
        .await?;
    Ok(Json(items))
}

/// Combined SLA + plan-month view in one round-trip
#[utoipa::path(
    get,
    path = "/overview",
    tag = "Overview",
    security(("bearer_auth" = [])),
    params(
        ("year" = i32, Query, description = "Year"),
        ("months" = Option<String>, Query, description = "Comma-separated months")
    ),
    responses((status = 200, description = "Combined overview", body = Overview))
)]
pub async fn get_overview(
    State(state): State<AppState>,
    Query(params): Query<OverviewParams>,
) -> AppResult<Json<Overview>> {
    let months = parse_months(params.months.as_deref())?;
    let overview = state.overview_service.overview(params.year, months).await?;
    Ok(Json(overview))
}
