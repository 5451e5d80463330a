//! Approval tracking service.
//!
//! Assignment is a plain insert protected by the composite unique index.
//! Completion runs in one Unit-of-Work transaction together with the
//! refresh of the request's aggregate status.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Approval, RequestStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Approval service trait for dependency injection.
#[async_trait]
pub trait ApprovalService: Send + Sync {
    /// Records of a request, optionally narrowed by stage and/or role.
    async fn list(
        &self,
        external_id: &str,
        stage: Option<String>,
        role: Option<String>,
    ) -> AppResult<Vec<Approval>>;

    /// Assign a stage to a role; duplicate (stage, role) pairs conflict.
    async fn assign(
        &self,
        external_id: &str,
        stage: String,
        role: String,
        strategic: bool,
    ) -> AppResult<Approval>;

    /// Complete a stage and refresh the request's aggregate status.
    async fn complete(
        &self,
        external_id: &str,
        stage: String,
        role: String,
        result: Option<String>,
    ) -> AppResult<Approval>;
}

/// Concrete implementation of ApprovalService using Unit of Work.
pub struct ApprovalManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ApprovalManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn request_id(&self, external_id: &str) -> AppResult<i64> {
        self.uow
            .requests()
            .find_by_external_id(external_id)
            .await?
            .map(|r| r.id)
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl<U: UnitOfWork> ApprovalService for ApprovalManager<U> {
    async fn list(
        &self,
        external_id: &str,
        stage: Option<String>,
        role: Option<String>,
    ) -> AppResult<Vec<Approval>> {
        let request_id = self.request_id(external_id).await?;
        self.uow
            .approvals()
            .list_for_request(request_id, stage, role)
            .await
    }

    async fn assign(
        &self,
        external_id: &str,
        stage: String,
        role: String,
        strategic: bool,
    ) -> AppResult<Approval> {
        let stage = stage.trim().to_string();
        let role = role.trim().to_string();
        if stage.is_empty() || role.is_empty() {
            return Err(AppError::validation("Stage and role are required"));
        }

        let request_id = self.request_id(external_id).await?;
        let approval = self
            .uow
            .approvals()
            .assign(request_id, stage, role, strategic)
            .await?;

        tracing::info!(
            external_id = %external_id,
            stage = %approval.stage,
            role = %approval.role,
            "Approval stage assigned"
        );
        Ok(approval)
    }

    async fn complete(
        &self,
        external_id: &str,
        stage: String,
        role: String,
        result: Option<String>,
    ) -> AppResult<Approval> {
        let request_id = self.request_id(external_id).await?;

        // Completion and the status refresh must land together
        let approval = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let approval = ctx
                        .approvals()
                        .complete(request_id, &stage, &role, result)
                        .await?;

                    let status = if ctx.approvals().count_open(request_id).await? == 0 {
                        RequestStatus::Completed
                    } else {
                        RequestStatus::InProgress
                    };
                    ctx.requests().set_status(request_id, status).await?;

                    Ok(approval)
                })
            })
            .await?;

        tracing::info!(
            external_id = %external_id,
            stage = %approval.stage,
            role = %approval.role,
            "Approval stage completed"
        );
        Ok(approval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::domain::PurchaseRequest;
    use crate::infra::{MockApprovalRepository, MockPurchaseRequestRepository};
    use crate::services::test_support::TestUnitOfWork;

    fn request(id: i64, external_id: &str) -> PurchaseRequest {
        let now = Utc::now();
        PurchaseRequest {
            id,
            external_id: external_id.to_string(),
            subject: None,
            status: RequestStatus::New,
            csi_token: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    fn approval(request_id: i64, stage: &str, role: &str) -> Approval {
        Approval {
            id: 1,
            purchase_request_id: request_id,
            stage: stage.to_string(),
            role: role.to_string(),
            strategic: false,
            assigned_at: Utc::now(),
            completed_at: None,
            result: None,
        }
    }

    fn manager(
        requests: MockPurchaseRequestRepository,
        approvals: MockApprovalRepository,
    ) -> ApprovalManager<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            requests: Some(Arc::new(requests)),
            approvals: Some(Arc::new(approvals)),
            ..Default::default()
        };
        ApprovalManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn assign_requires_an_existing_request() {
        let mut requests = MockPurchaseRequestRepository::new();
        requests.expect_find_by_external_id().returning(|_| Ok(None));

        let service = manager(requests, MockApprovalRepository::new());
        let err = service
            .assign("PR-MISSING", "REVIEW".to_string(), "MANAGER".to_string(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn duplicate_assignment_surfaces_as_conflict() {
        let mut requests = MockPurchaseRequestRepository::new();
        requests
            .expect_find_by_external_id()
            .returning(|ext| Ok(Some(request(11, ext))));

        let mut approvals = MockApprovalRepository::new();
        approvals
            .expect_assign()
            .returning(|_, _, _, _| Err(AppError::conflict("Approval")));

        let service = manager(requests, approvals);
        let err = service
            .assign("PR-1", "REVIEW".to_string(), "MANAGER".to_string(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn assign_validates_stage_and_role_before_lookup() {
        // No request mock wired: validation must short-circuit first
        let service = manager(
            MockPurchaseRequestRepository::new(),
            MockApprovalRepository::new(),
        );

        let err = service
            .assign("PR-1", "  ".to_string(), "MANAGER".to_string(), false)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn list_narrows_by_stage_and_role() {
        let mut requests = MockPurchaseRequestRepository::new();
        requests
            .expect_find_by_external_id()
            .returning(|ext| Ok(Some(request(11, ext))));

        let mut approvals = MockApprovalRepository::new();
        approvals
            .expect_list_for_request()
            .withf(|id, stage, role| {
                *id == 11
                    && stage.as_deref() == Some("REVIEW")
                    && role.as_deref() == Some("MANAGER")
            })
            .returning(|id, _, _| Ok(vec![approval(id, "REVIEW", "MANAGER")]));

        let service = manager(requests, approvals);
        let records = service
            .list(
                "PR-1",
                Some("REVIEW".to_string()),
                Some("MANAGER".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stage, "REVIEW");
    }
}
