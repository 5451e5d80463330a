//! Approval stage records.
//!
//! One record per (request, stage, role); uniqueness is enforced by a
//! composite database index, not by lookup-then-insert logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Approval record domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approval {
    pub id: i64,
    pub purchase_request_id: i64,
    /// Named step in the sign-off workflow
    pub stage: String,
    /// Role responsible for the stage
    pub role: String,
    pub strategic: bool,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub result: Option<String>,
}

impl Approval {
    /// Calendar-day difference between assignment and completion.
    ///
    /// Derived at read time; open records count up to `now`.
    pub fn days_in_work(&self, now: DateTime<Utc>) -> i64 {
        let end = self.completed_at.unwrap_or(now);
        (end.date_naive() - self.assigned_at.date_naive()).num_days()
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Approval record response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApprovalResponse {
    /// Stage name
    #[schema(example = "TECHNICAL_REVIEW")]
    pub stage: String,
    /// Responsible role
    #[schema(example = "CATEGORY_MANAGER")]
    pub role: String,
    /// Strategic-product flag
    pub strategic: bool,
    /// Assignment timestamp
    pub assigned_at: DateTime<Utc>,
    /// Completion timestamp, absent while the stage is open
    pub completed_at: Option<DateTime<Utc>>,
    /// Free-text completion result
    pub result: Option<String>,
    /// Calendar days between assignment and completion (or now, while open)
    pub days_in_work: i64,
}

impl From<Approval> for ApprovalResponse {
    fn from(approval: Approval) -> Self {
        let days_in_work = approval.days_in_work(Utc::now());
        Self {
            stage: approval.stage,
            role: approval.role,
            strategic: approval.strategic,
            assigned_at: approval.assigned_at,
            completed_at: approval.completed_at,
            result: approval.result,
            days_in_work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn approval(assigned: DateTime<Utc>, completed: Option<DateTime<Utc>>) -> Approval {
        Approval {
            id: 1,
            purchase_request_id: 1,
            stage: "REVIEW".to_string(),
            role: "MANAGER".to_string(),
            strategic: false,
            assigned_at: assigned,
            completed_at: completed,
            result: None,
        }
    }

    #[test]
    fn days_in_work_is_calendar_day_difference() {
        let assigned = Utc.with_ymd_and_hms(2025, 3, 10, 23, 50, 0).unwrap();
        let completed = Utc.with_ymd_and_hms(2025, 3, 12, 0, 5, 0).unwrap();

        let record = approval(assigned, Some(completed));
        assert_eq!(record.days_in_work(Utc::now()), 2);
    }

    #[test]
    fn open_record_counts_up_to_now() {
        let assigned = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap();

        let record = approval(assigned, None);
        assert_eq!(record.days_in_work(now), 5);
    }

    #[test]
    fn same_day_completion_is_zero_days() {
        let assigned = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let completed = Utc.with_ymd_and_hms(2025, 3, 10, 17, 30, 0).unwrap();

        let record = approval(assigned, Some(completed));
        assert_eq!(record.days_in_work(Utc::now()), 0);
    }
}
