//! Purchase plan service: versions and items.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{PlanItem, PlanVersion};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Plan service trait for dependency injection.
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Create the next version for a year; optionally mark it current,
    /// atomically flipping the prior current version off.
    async fn create_version(&self, year: i32, make_current: bool) -> AppResult<PlanVersion>;

    async fn list_versions(&self, year: i32) -> AppResult<Vec<PlanVersion>>;

    /// Add an item to the year's current version. The purchase subject is
    /// unique per version, compared case-insensitively.
    async fn create_item(&self, year: i32, subject: String, month: i16) -> AppResult<PlanItem>;

    async fn items_for_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItem>>;

    /// Assign (or clear) the purchaser of an item. Returns rows affected;
    /// zero means the stored value already matched.
    async fn assign_purchaser(&self, guid: Uuid, purchaser_id: Option<i64>) -> AppResult<u64>;
}

/// Concrete implementation of PlanService using Unit of Work.
pub struct PlanManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PlanManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> PlanService for PlanManager<U> {
    async fn create_version(&self, year: i32, make_current: bool) -> AppResult<PlanVersion> {
        let version = self.uow.plans().create_version(year, make_current).await?;
        tracing::info!(
            year = version.year,
            version_number = version.version_number,
            is_current = version.is_current,
            "Plan version created"
        );
        Ok(version)
    }

    async fn list_versions(&self, year: i32) -> AppResult<Vec<PlanVersion>> {
        self.uow.plans().list_versions(year).await
    }

    async fn create_item(&self, year: i32, subject: String, month: i16) -> AppResult<PlanItem> {
        let subject = subject.trim().to_string();
        if subject.is_empty() {
            return Err(AppError::validation("Purchase subject is required"));
        }
        if !(1..=12).contains(&month) {
            return Err(AppError::validation("Month must be between 1 and 12"));
        }

        let version = self
            .uow
            .plans()
            .current_version(year)
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("Year {} has no current plan version", year))
            })?;

        if self
            .uow
            .plans()
            .find_item_by_subject(version.id, &subject)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Plan item"));
        }

        self.uow
            .plans()
            .create_item(year, version.id, subject, month)
            .await
    }

    async fn items_for_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItem>> {
        self.uow.plans().items_for_months(year, months).await
    }

    async fn assign_purchaser(&self, guid: Uuid, purchaser_id: Option<i64>) -> AppResult<u64> {
        // Missing guid and unchanged value both report zero rows; only the
        // former is an error for the caller.
        if self.uow.plans().find_item_by_guid(guid).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let rows = self.uow.plans().assign_purchaser(guid, purchaser_id).await?;
        tracing::info!(guid = %guid, rows_affected = rows, "Purchaser assignment");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::MockPlanRepository;
    use crate::services::test_support::TestUnitOfWork;

    fn version(year: i32, number: i32, current: bool) -> PlanVersion {
        PlanVersion {
            id: number as i64,
            year,
            version_number: number,
            is_current: current,
            created_at: Utc::now(),
        }
    }

    fn item(guid: Uuid) -> PlanItem {
        let now = Utc::now();
        PlanItem {
            id: 1,
            guid,
            year: 2025,
            version_id: 1,
            subject: "Office network equipment".to_string(),
            month: 6,
            purchaser_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn manager(plans: MockPlanRepository) -> PlanManager<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            plans: Some(Arc::new(plans)),
            ..Default::default()
        };
        PlanManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn create_version_delegates_with_requested_flags() {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_create_version()
            .with(eq(2025), eq(true))
            .returning(|year, current| Ok(version(year, 1, current)));

        let service = manager(plans);
        let created = service.create_version(2025, true).await.unwrap();

        assert_eq!(created.version_number, 1);
        assert!(created.is_current);
    }

    #[tokio::test]
    async fn create_item_requires_a_current_version() {
        let mut plans = MockPlanRepository::new();
        plans.expect_current_version().returning(|_| Ok(None));

        let service = manager(plans);
        let err = service
            .create_item(2025, "Chairs".to_string(), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_item_rejects_duplicate_subject_case_insensitively() {
        let mut plans = MockPlanRepository::new();
        plans
            .expect_current_version()
            .returning(|year| Ok(Some(version(year, 1, true))));
        plans
            .expect_find_item_by_subject()
            .returning(|_, _| Ok(Some(item(Uuid::new_v4()))));

        let service = manager(plans);
        let err = service
            .create_item(2025, "OFFICE NETWORK EQUIPMENT".to_string(), 6)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_item_validates_month_range() {
        let service = manager(MockPlanRepository::new());

        assert!(service
            .create_item(2025, "Chairs".to_string(), 0)
            .await
            .is_err());
        assert!(service
            .create_item(2025, "Chairs".to_string(), 13)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn assign_purchaser_fails_for_unknown_guid() {
        let mut plans = MockPlanRepository::new();
        plans.expect_find_item_by_guid().returning(|_| Ok(None));

        let service = manager(plans);
        let err = service
            .assign_purchaser(Uuid::new_v4(), Some(7))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn unchanged_purchaser_reports_zero_rows() {
        let guid = Uuid::new_v4();
        let mut plans = MockPlanRepository::new();
        plans
            .expect_find_item_by_guid()
            .returning(move |g| Ok(Some(item(g))));
        plans
            .expect_assign_purchaser()
            .with(eq(guid), eq(Some(7i64)))
            .returning(|_, _| Ok(0));

        let service = manager(plans);
        let rows = service.assign_purchaser(guid, Some(7)).await.unwrap();

        assert_eq!(rows, 0);
    }
}
