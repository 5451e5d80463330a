//! Plan versioning contract tests.
//!
//! Exercises the PlanService contract against an in-memory implementation
//! that mirrors the store's transactional rules: monotonic version numbers
//! per year and at most one current version.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use procura::domain::{PlanItem, PlanVersion};
use procura::errors::{AppError, AppResult};
use procura::services::PlanService;

/// In-memory PlanService mirroring the production invariants
#[derive(Default)]
struct InMemoryPlanService {
    versions: Mutex<Vec<PlanVersion>>,
    items: Mutex<Vec<PlanItem>>,
}

#[async_trait]
impl PlanService for InMemoryPlanService {
    async fn create_version(&self, year: i32, make_current: bool) -> AppResult<PlanVersion> {
        let mut versions = self.versions.lock().unwrap();

        let max = versions
            .iter()
            .filter(|v| v.year == year)
            .map(|v| v.version_number)
            .max()
            .unwrap_or(0);

        if make_current {
            // Same flip the store performs inside its transaction
            for version in versions.iter_mut().filter(|v| v.year == year) {
                version.is_current = false;
            }
        }

        let version = PlanVersion {
            id: versions.len() as i64 + 1,
            year,
            version_number: max + 1,
            is_current: make_current,
            created_at: Utc::now(),
        };
        versions.push(version.clone());
        Ok(version)
    }

    async fn list_versions(&self, year: i32) -> AppResult<Vec<PlanVersion>> {
        let versions = self.versions.lock().unwrap();
        Ok(versions.iter().filter(|v| v.year == year).cloned().collect())
    }

    async fn create_item(&self, year: i32, subject: String, month: i16) -> AppResult<PlanItem> {
        let current = self
            .list_versions(year)
            .await?
            .into_iter()
            .find(|v| v.is_current)
            .ok_or_else(|| AppError::validation("No current version"))?;

        let mut items = self.items.lock().unwrap();
        if items
            .iter()
            .any(|i| i.version_id == current.id && i.subject.eq_ignore_ascii_case(&subject))
        {
            return Err(AppError::conflict("Plan item"));
        }

        let now = Utc::now();
        let item = PlanItem {
            id: items.len() as i64 + 1,
            guid: Uuid::new_v4(),
            year,
            version_id: current.id,
            subject,
            month,
            purchaser_id: None,
            created_at: now,
            updated_at: now,
        };
        items.push(item.clone());
        Ok(item)
    }

    async fn items_for_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItem>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.year == year && (months.is_empty() || months.contains(&i.month)))
            .cloned()
            .collect())
    }

    async fn assign_purchaser(&self, guid: Uuid, purchaser_id: Option<i64>) -> AppResult<u64> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.guid == guid)
            .ok_or(AppError::NotFound)?;

        // Conditional update: unchanged value affects zero rows
        if item.purchaser_id == purchaser_id {
            return Ok(0);
        }
        item.purchaser_id = purchaser_id;
        Ok(1)
    }
}

#[tokio::test]
async fn version_numbers_start_at_one_and_grow_monotonically() {
    let service = InMemoryPlanService::default();

    let v1 = service.create_version(2025, false).await.unwrap();
    let v2 = service.create_version(2025, false).await.unwrap();
    let other_year = service.create_version(2026, false).await.unwrap();

    assert_eq!(v1.version_number, 1);
    assert_eq!(v2.version_number, 2);
    assert_eq!(other_year.version_number, 1);
}

#[tokio::test]
async fn creating_a_new_current_version_flips_the_old_one() {
    let service = InMemoryPlanService::default();

    let v1 = service.create_version(2025, true).await.unwrap();
    assert!(v1.is_current);

    let v2 = service.create_version(2025, true).await.unwrap();
    assert!(v2.is_current);
    assert_eq!(v2.version_number, 2);

    let versions = service.list_versions(2025).await.unwrap();
    let currents: Vec<_> = versions.iter().filter(|v| v.is_current).collect();
    assert_eq!(currents.len(), 1, "exactly one current version per year");
    assert_eq!(currents[0].version_number, 2);
}

#[tokio::test]
async fn current_flag_is_scoped_to_the_year() {
    let service = InMemoryPlanService::default();

    service.create_version(2025, true).await.unwrap();
    service.create_version(2026, true).await.unwrap();

    let y2025 = service.list_versions(2025).await.unwrap();
    let y2026 = service.list_versions(2026).await.unwrap();

    assert!(y2025.iter().any(|v| v.is_current));
    assert!(y2026.iter().any(|v| v.is_current));
}

#[tokio::test]
async fn duplicate_subject_in_a_version_conflicts_case_insensitively() {
    let service = InMemoryPlanService::default();
    service.create_version(2025, true).await.unwrap();

    service
        .create_item(2025, "Office chairs".to_string(), 4)
        .await
        .unwrap();

    let err = service
        .create_item(2025, "OFFICE CHAIRS".to_string(), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn purchaser_assignment_is_a_conditional_update() {
    let service = InMemoryPlanService::default();
    service.create_version(2025, true).await.unwrap();
    let item = service
        .create_item(2025, "Office chairs".to_string(), 4)
        .await
        .unwrap();

    // First assignment changes a row
    assert_eq!(service.assign_purchaser(item.guid, Some(7)).await.unwrap(), 1);
    // Re-assigning the same value is a no-op
    assert_eq!(service.assign_purchaser(item.guid, Some(7)).await.unwrap(), 0);
    // Clearing changes a row again
    assert_eq!(service.assign_purchaser(item.guid, None).await.unwrap(), 1);
    // Unknown guid is an error, not a silent zero
    assert!(service
        .assign_purchaser(Uuid::new_v4(), Some(7))
        .await
        .is_err());
}
