//! Purchase request repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use super::entities::purchase_request::{self, Entity as RequestEntity};
use super::map_insert_err;
use crate::domain::{PurchaseRequest, RequestStatus, SlaStat};
use crate::errors::AppResult;
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Purchase request repository trait for dependency injection.
///
/// Requests are never hard-deleted; the trait deliberately has no delete.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PurchaseRequestRepository: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<PurchaseRequest>>;

    async fn find_by_csi_token(&self, token: Uuid) -> AppResult<Option<PurchaseRequest>>;

    async fn list_paginated(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<PurchaseRequest>, u64)>;

    /// Import a request from the source system. Duplicate external ids conflict.
    async fn create(
        &self,
        external_id: String,
        subject: Option<String>,
    ) -> AppResult<PurchaseRequest>;

    /// SLA statistics grouped by request status for one year: request count
    /// and mean approval days-in-work per group.
    async fn sla_stats(&self, year: i32) -> AppResult<Vec<SlaStat>>;
}

#[derive(Debug, FromQueryResult)]
struct SlaRow {
    status: String,
    requests: i64,
    avg_days_in_work: Option<f64>,
}

/// SeaORM-backed implementation of `PurchaseRequestRepository`
pub struct PurchaseRequestStore {
    db: DatabaseConnection,
}

impl PurchaseRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PurchaseRequestRepository for PurchaseRequestStore {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<PurchaseRequest>> {
        let model = RequestEntity::find()
            .filter(purchase_request::Column::ExternalId.eq(external_id))
            .one(&self.db)
            .await?;
        Ok(model.map(PurchaseRequest::from))
    }

    async fn find_by_csi_token(&self, token: Uuid) -> AppResult<Option<PurchaseRequest>> {
        let model = RequestEntity::find()
            .filter(purchase_request::Column::CsiToken.eq(token))
            .one(&self.db)
            .await?;
        Ok(model.map(PurchaseRequest::from))
    }

    async fn list_paginated(
        &self,
        params: &PaginationParams,
    ) -> AppResult<(Vec<PurchaseRequest>, u64)> {
        let paginator = RequestEntity::find()
            .order_by_desc(purchase_request::Column::CreatedAt)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(PurchaseRequest::from).collect(), total))
    }

    async fn create(
        &self,
        external_id: String,
        subject: Option<String>,
    ) -> AppResult<PurchaseRequest> {
        let now = chrono::Utc::now();
        let active = purchase_request::ActiveModel {
            external_id: Set(external_id),
            subject: Set(subject),
            status: Set(RequestStatus::New.as_code().to_string()),
            csi_token: Set(Uuid::new_v4()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Purchase request", e))?;
        Ok(PurchaseRequest::from(model))
    }

    async fn sla_stats(&self, year: i32) -> AppResult<Vec<SlaStat>> {
        // Plain aggregation over requests and their approval records; the
        // day difference is derived in SQL, mirroring the read-time rule.
        let rows = SlaRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT pr.status AS status,
                   COUNT(DISTINCT pr.id) AS requests,
                   AVG(EXTRACT(EPOCH FROM (pa.completed_at - pa.assigned_at)) / 86400.0)::float8
                       AS avg_days_in_work
            FROM purchase_requests pr
            LEFT JOIN purchase_approvals pa ON pa.purchase_request_id = pr.id
            WHERE EXTRACT(YEAR FROM pr.created_at) = $1
            GROUP BY pr.status
            ORDER BY pr.status
            "#,
            [year.into()],
        ))
        .all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| SlaStat {
                status: row.status,
                requests: row.requests,
                avg_days_in_work: row.avg_days_in_work,
            })
            .collect())
    }
}
