//! Purchase plan versions and items.
//!
//! A year has N immutable numbered versions; exactly one may be current.
//! Items belong to a year and a version and are addressed by a global guid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Numbered plan snapshot for a year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanVersion {
    pub id: i64,
    pub year: i32,
    pub version_number: i32,
    pub is_current: bool,
    pub created_at: DateTime<Utc>,
}

/// Planned purchase line inside a version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: i64,
    pub guid: Uuid,
    pub year: i32,
    pub version_id: i64,
    pub subject: String,
    /// Planned month, 1-12
    pub month: i16,
    pub purchaser_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plan version response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanVersionResponse {
    /// Plan year
    #[schema(example = 2025)]
    pub year: i32,
    /// Monotonic version number within the year
    #[schema(example = 3)]
    pub version_number: i32,
    /// Whether this is the year's current version
    pub is_current: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<PlanVersion> for PlanVersionResponse {
    fn from(version: PlanVersion) -> Self {
        Self {
            year: version.year,
            version_number: version.version_number,
            is_current: version.is_current,
            created_at: version.created_at,
        }
    }
}

/// Plan item response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlanItemResponse {
    /// Globally unique item identifier
    pub guid: Uuid,
    /// Plan year
    pub year: i32,
    /// Purchase subject
    #[schema(example = "Office network equipment")]
    pub subject: String,
    /// Planned month, 1-12
    pub month: i16,
    /// Assigned purchaser, absent until assignment
    pub purchaser_id: Option<i64>,
}

impl From<PlanItem> for PlanItemResponse {
    fn from(item: PlanItem) -> Self {
        Self {
            guid: item.guid,
            year: item.year,
            subject: item.subject,
            month: item.month,
            purchaser_id: item.purchaser_id,
        }
    }
}
