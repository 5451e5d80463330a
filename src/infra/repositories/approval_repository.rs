//! Approval record repository.
//!
//! Assignment inserts rely on the composite unique index; a duplicate
//! (request, stage, role) insert comes back as a conflict, never as a
//! silent overwrite. Completion runs through the Unit of Work so the
//! request's aggregate status can be refreshed in the same transaction.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::purchase_approval::{self, Entity as ApprovalEntity};
use super::map_insert_err;
use crate::domain::Approval;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Approval repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ApprovalRepository: Send + Sync {
    /// All records for a request, optionally narrowed by stage and/or role.
    async fn list_for_request(
        &self,
        purchase_request_id: i64,
        stage: Option<String>,
        role: Option<String>,
    ) -> AppResult<Vec<Approval>>;

    /// Assign a stage to a role. Duplicate (request, stage, role) conflicts.
    async fn assign(
        &self,
        purchase_request_id: i64,
        stage: String,
        role: String,
        strategic: bool,
    ) -> AppResult<Approval>;
}

/// SeaORM-backed implementation of `ApprovalRepository`
pub struct ApprovalStore {
    db: DatabaseConnection,
}

impl ApprovalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApprovalRepository for ApprovalStore {
    async fn list_for_request(
        &self,
        purchase_request_id: i64,
        stage: Option<String>,
        role: Option<String>,
    ) -> AppResult<Vec<Approval>> {
        let mut query = ApprovalEntity::find()
            .filter(purchase_approval::Column::PurchaseRequestId.eq(purchase_request_id));

        if let Some(stage) = stage {
            query = query.filter(purchase_approval::Column::Stage.eq(stage));
        }
        if let Some(role) = role {
            query = query.filter(purchase_approval::Column::Role.eq(role));
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Approval::from).collect())
    }

    async fn assign(
        &self,
        purchase_request_id: i64,
        stage: String,
        role: String,
        strategic: bool,
    ) -> AppResult<Approval> {
        let active = purchase_approval::ActiveModel {
            purchase_request_id: Set(purchase_request_id),
            stage: Set(stage),
            role: Set(role),
            strategic: Set(strategic),
            assigned_at: Set(chrono::Utc::now()),
            completed_at: Set(None),
            result: Set(None),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Approval", e))?;
        Ok(Approval::from(model))
    }
}
