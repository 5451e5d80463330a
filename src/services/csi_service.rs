//! CSI feedback service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{MAX_CSI_RATING, MIN_CSI_RATING};
use crate::domain::CsiFeedback;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// CSI feedback service trait for dependency injection.
#[async_trait]
pub trait CsiService: Send + Sync {
    /// Submit feedback through a survey token. One submission per token.
    async fn submit(&self, token: Uuid, rating: i16, comment: Option<String>)
        -> AppResult<CsiFeedback>;

    /// Feedback recorded for a request, if any.
    async fn for_request(&self, external_id: &str) -> AppResult<Option<CsiFeedback>>;
}

/// Concrete implementation of CsiService using Unit of Work.
pub struct CsiManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CsiManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CsiService for CsiManager<U> {
    async fn submit(
        &self,
        token: Uuid,
        rating: i16,
        comment: Option<String>,
    ) -> AppResult<CsiFeedback> {
        if !(MIN_CSI_RATING..=MAX_CSI_RATING).contains(&rating) {
            return Err(AppError::validation(format!(
                "Rating must be between {} and {}",
                MIN_CSI_RATING, MAX_CSI_RATING
            )));
        }

        let request = self
            .uow
            .requests()
            .find_by_csi_token(token)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.csi().submit(request.id, rating, comment).await
    }

    async fn for_request(&self, external_id: &str) -> AppResult<Option<CsiFeedback>> {
        let request = self
            .uow
            .requests()
            .find_by_external_id(external_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.uow.csi().find_by_request(request.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::{PurchaseRequest, RequestStatus};
    use crate::infra::{MockCsiRepository, MockPurchaseRequestRepository};
    use crate::services::test_support::TestUnitOfWork;

    fn manager(
        requests: MockPurchaseRequestRepository,
        csi: MockCsiRepository,
    ) -> CsiManager<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            requests: Some(Arc::new(requests)),
            csi: Some(Arc::new(csi)),
            ..Default::default()
        };
        CsiManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn rejects_rating_outside_scale() {
        let service = manager(
            MockPurchaseRequestRepository::new(),
            MockCsiRepository::new(),
        );

        assert!(service.submit(Uuid::new_v4(), 0, None).await.is_err());
        assert!(service.submit(Uuid::new_v4(), 6, None).await.is_err());
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let mut requests = MockPurchaseRequestRepository::new();
        requests.expect_find_by_csi_token().returning(|_| Ok(None));

        let service = manager(requests, MockCsiRepository::new());
        let err = service.submit(Uuid::new_v4(), 4, None).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn submission_reaches_the_request_row() {
        let token = Uuid::new_v4();
        let mut requests = MockPurchaseRequestRepository::new();
        requests.expect_find_by_csi_token().returning(move |t| {
            let now = Utc::now();
            Ok(Some(PurchaseRequest {
                id: 42,
                external_id: "PR-1".to_string(),
                subject: None,
                status: RequestStatus::Completed,
                csi_token: t,
                created_at: now,
                updated_at: now,
            }))
        });

        let mut csi = MockCsiRepository::new();
        csi.expect_submit()
            .withf(|request_id, rating, _| *request_id == 42 && *rating == 4)
            .returning(|request_id, rating, comment| {
                Ok(CsiFeedback {
                    id: 1,
                    purchase_request_id: request_id,
                    rating,
                    comment,
                    submitted_at: Utc::now(),
                })
            });

        let service = manager(requests, csi);
        let feedback = service
            .submit(token, 4, Some("Good".to_string()))
            .await
            .unwrap();

        assert_eq!(feedback.purchase_request_id, 42);
    }
}
