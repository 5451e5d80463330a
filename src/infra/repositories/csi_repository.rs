//! CSI feedback repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::csi_feedback::{self, Entity as CsiEntity};
use super::map_insert_err;
use crate::domain::CsiFeedback;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// CSI feedback repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CsiRepository: Send + Sync {
    /// Record feedback for a request. A second submission conflicts.
    async fn submit(
        &self,
        purchase_request_id: i64,
        rating: i16,
        comment: Option<String>,
    ) -> AppResult<CsiFeedback>;

    async fn find_by_request(&self, purchase_request_id: i64) -> AppResult<Option<CsiFeedback>>;
}

/// SeaORM-backed implementation of `CsiRepository`
pub struct CsiStore {
    db: DatabaseConnection,
}

impl CsiStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CsiRepository for CsiStore {
    async fn submit(
        &self,
        purchase_request_id: i64,
        rating: i16,
        comment: Option<String>,
    ) -> AppResult<CsiFeedback> {
        let active = csi_feedback::ActiveModel {
            purchase_request_id: Set(purchase_request_id),
            rating: Set(rating),
            comment: Set(comment),
            submitted_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Feedback", e))?;
        Ok(CsiFeedback::from(model))
    }

    async fn find_by_request(&self, purchase_request_id: i64) -> AppResult<Option<CsiFeedback>> {
        let model = CsiEntity::find()
            .filter(csi_feedback::Column::PurchaseRequestId.eq(purchase_request_id))
            .one(&self.db)
            .await?;
        Ok(model.map(CsiFeedback::from))
    }
}
