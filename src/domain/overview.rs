//! Read-model types for the overview aggregation endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use super::PlanItemResponse;

/// SLA statistics for one request status group
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlaStat {
    /// Request status group
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
    /// Requests in the group
    pub requests: i64,
    /// Mean days in work across the group's approval records
    pub avg_days_in_work: Option<f64>,
}

/// Combined overview payload: SLA stats plus plan items for selected months.
///
/// Exists purely to collapse two independent reads into one round-trip.
#[derive(Debug, Serialize, ToSchema)]
pub struct Overview {
    pub sla: Vec<SlaStat>,
    pub plan_items: Vec<PlanItemResponse>,
}
