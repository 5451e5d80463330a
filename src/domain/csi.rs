//! Customer satisfaction (CSI) feedback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// CSI feedback attached to a completed request via its survey token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsiFeedback {
    pub id: i64,
    pub purchase_request_id: i64,
    /// Rating 1-5
    pub rating: i16,
    pub comment: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// CSI feedback response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CsiFeedbackResponse {
    /// Rating 1-5
    #[schema(example = 4)]
    pub rating: i16,
    /// Free-text comment
    pub comment: Option<String>,
    /// Submission timestamp
    pub submitted_at: DateTime<Utc>,
}

impl From<CsiFeedback> for CsiFeedbackResponse {
    fn from(feedback: CsiFeedback) -> Self {
        Self {
            rating: feedback.rating,
            comment: feedback.comment,
            submitted_at: feedback.submitted_at,
        }
    }
}
