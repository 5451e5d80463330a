//! Overview read-model service.
//!
//! Combines independent read queries into one response object purely to cut
//! client round-trips; no computation beyond the per-resource endpoints.

use async_trait::async_trait;
use std::sync::Arc;

use super::container::parallel;
use crate::domain::{Overview, PlanItemResponse, SlaStat};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Overview service trait for dependency injection.
#[async_trait]
pub trait OverviewService: Send + Sync {
    /// SLA statistics by request status group for a year.
    async fn sla(&self, year: i32) -> AppResult<Vec<SlaStat>>;

    /// Current-version plan items across a set of months.
    async fn plan_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItemResponse>>;

    /// Both reads combined; the queries run concurrently.
    async fn overview(&self, year: i32, months: Vec<i16>) -> AppResult<Overview>;
}

/// Concrete implementation of OverviewService using Unit of Work.
pub struct OverviewManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> OverviewManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> OverviewService for OverviewManager<U> {
    async fn sla(&self, year: i32) -> AppResult<Vec<SlaStat>> {
        self.uow.requests().sla_stats(year).await
    }

    async fn plan_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItemResponse>> {
        let items = self.uow.plans().items_for_months(year, months).await?;
        Ok(items.into_iter().map(PlanItemResponse::from).collect())
    }

    async fn overview(&self, year: i32, months: Vec<i16>) -> AppResult<Overview> {
        let (sla, plan_items) =
            parallel::join2(self.sla(year), self.plan_months(year, months)).await?;

        Ok(Overview { sla, plan_items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::PlanItem;
    use crate::infra::{MockPlanRepository, MockPurchaseRequestRepository};
    use crate::services::test_support::TestUnitOfWork;

    #[tokio::test]
    async fn overview_combines_both_reads() {
        let mut requests = MockPurchaseRequestRepository::new();
        requests.expect_sla_stats().returning(|_| {
            Ok(vec![SlaStat {
                status: "IN_PROGRESS".to_string(),
                requests: 3,
                avg_days_in_work: Some(2.5),
            }])
        });

        let mut plans = MockPlanRepository::new();
        plans.expect_items_for_months().returning(|year, _| {
            let now = Utc::now();
            Ok(vec![PlanItem {
                id: 1,
                guid: Uuid::new_v4(),
                year,
                version_id: 1,
                subject: "Chairs".to_string(),
                month: 2,
                purchaser_id: None,
                created_at: now,
                updated_at: now,
            }])
        });

        let uow = TestUnitOfWork {
            requests: Some(Arc::new(requests)),
            plans: Some(Arc::new(plans)),
            ..Default::default()
        };
        let service = OverviewManager::new(Arc::new(uow));

        let overview = service.overview(2025, vec![1, 2]).await.unwrap();

        assert_eq!(overview.sla.len(), 1);
        assert_eq!(overview.sla[0].requests, 3);
        assert_eq!(overview.plan_items.len(), 1);
        assert_eq!(overview.plan_items[0].month, 2);
    }
}
