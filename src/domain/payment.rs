//! Payment domain entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Payment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Planned,
    InProgress,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            PaymentStatus::Planned => "PLANNED",
            PaymentStatus::InProgress => "IN_PROGRESS",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }

    /// Exact-match parse of a wire/storage code
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "PLANNED" => Some(PaymentStatus::Planned),
            "IN_PROGRESS" => Some(PaymentStatus::InProgress),
            "PAID" => Some(PaymentStatus::Paid),
            "CANCELLED" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        PaymentStatus::parse(s).unwrap_or(PaymentStatus::Planned)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// Payment domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// Linked purchase request, if any
    pub purchase_request_id: Option<i64>,
    /// Cost-center code (CFO)
    pub cfo: String,
    pub status: PaymentStatus,
    /// Status mirrored from the linked request
    pub request_status: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub executor_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payment response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i64,
    /// Linked purchase request id, absent for unlinked payments
    pub purchase_request_id: Option<i64>,
    /// Cost-center code
    #[schema(example = "CFO-IT")]
    pub cfo: String,
    /// Payment status
    #[schema(example = "PLANNED")]
    pub status: String,
    /// Status mirrored from the linked request
    pub request_status: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub executor_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub comment: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            purchase_request_id: payment.purchase_request_id,
            cfo: payment.cfo,
            status: payment.status.to_string(),
            request_status: payment.request_status,
            planned_date: payment.planned_date,
            actual_date: payment.actual_date,
            executor_id: payment.executor_id,
            responsible_id: payment.responsible_id,
            comment: payment.comment,
        }
    }
}
