//! Purchase request domain entity.
//!
//! Requests are imported from the upstream procurement system, updated as
//! approval stages complete, and never hard-deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Aggregate approval state of a request.
///
/// Serialization table is explicit; unknown stored codes read back as `New`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    New,
    InProgress,
    Completed,
}

impl RequestStatus {
    /// Stored/wire code for this status
    pub fn as_code(&self) -> &'static str {
        match self {
            RequestStatus::New => "NEW",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Completed => "COMPLETED",
        }
    }
}

impl From<&str> for RequestStatus {
    fn from(s: &str) -> Self {
        match s {
            "IN_PROGRESS" => RequestStatus::InProgress,
            "COMPLETED" => RequestStatus::Completed,
            _ => RequestStatus::New,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Purchase request domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Internal surrogate key
    pub id: i64,
    /// External-facing request identifier from the source system
    pub external_id: String,
    pub subject: Option<String>,
    pub status: RequestStatus,
    /// Token handed out for post-completion satisfaction surveys
    pub csi_token: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Purchase request response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PurchaseRequestResponse {
    /// External request identifier
    #[schema(example = "PR-2025-000123")]
    pub id_purchase_request: String,
    /// Request subject line
    pub subject: Option<String>,
    /// Aggregate approval status
    #[schema(example = "IN_PROGRESS")]
    pub status: String,
    /// CSI survey token
    pub csi_token: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<PurchaseRequest> for PurchaseRequestResponse {
    fn from(request: PurchaseRequest) -> Self {
        Self {
            id_purchase_request: request.external_id,
            subject: request.subject,
            status: request.status.to_string(),
            csi_token: request.csi_token,
            created_at: request.created_at,
        }
    }
}
