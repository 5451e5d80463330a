//! Unit of Work pattern implementation.
//!
//! Centralizes access to all repositories and manages database transactions
//! (begin, commit, rollback) so multi-aggregate writes stay consistent. The
//! one workflow that needs it here is approval completion, which updates the
//! approval record and the request's aggregate status atomically.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::{
    ApprovalRepository, ApprovalStore, ContractRepository, ContractStore, CsiRepository, CsiStore,
    PaymentRepository, PaymentStore, PlanRepository, PlanStore, PurchaseRequestRepository,
    PurchaseRequestStore, SupplierRepository, SupplierStore, UserRepository, UserStore,
};
use crate::domain::{Approval, RequestStatus};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the generic transaction methods make this trait non-mockable
/// directly. For testing, mock the repositories at the service level or use
/// integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;
    fn requests(&self) -> Arc<dyn PurchaseRequestRepository>;
    fn approvals(&self) -> Arc<dyn ApprovalRepository>;
    fn plans(&self) -> Arc<dyn PlanRepository>;
    fn payments(&self) -> Arc<dyn PaymentRepository>;
    fn suppliers(&self) -> Arc<dyn SupplierRepository>;
    fn contracts(&self) -> Arc<dyn ContractRepository>;
    fn csi(&self) -> Arc<dyn CsiRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    /// Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Approval operations bound to this transaction
    pub fn approvals(&self) -> TxApprovalRepository<'_> {
        TxApprovalRepository::new(self.txn)
    }

    /// Request operations bound to this transaction
    pub fn requests(&self) -> TxRequestRepository<'_> {
        TxRequestRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    requests: Arc<PurchaseRequestStore>,
    approvals: Arc<ApprovalStore>,
    plans: Arc<PlanStore>,
    payments: Arc<PaymentStore>,
    suppliers: Arc<SupplierStore>,
    contracts: Arc<ContractStore>,
    csi: Arc<CsiStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            requests: Arc::new(PurchaseRequestStore::new(db.clone())),
            approvals: Arc::new(ApprovalStore::new(db.clone())),
            plans: Arc::new(PlanStore::new(db.clone())),
            payments: Arc::new(PaymentStore::new(db.clone())),
            suppliers: Arc::new(SupplierStore::new(db.clone())),
            contracts: Arc::new(ContractStore::new(db.clone())),
            csi: Arc::new(CsiStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn requests(&self) -> Arc<dyn PurchaseRequestRepository> {
        self.requests.clone()
    }

    fn approvals(&self) -> Arc<dyn ApprovalRepository> {
        self.approvals.clone()
    }

    fn plans(&self) -> Arc<dyn PlanRepository> {
        self.plans.clone()
    }

    fn payments(&self) -> Arc<dyn PaymentRepository> {
        self.payments.clone()
    }

    fn suppliers(&self) -> Arc<dyn SupplierRepository> {
        self.suppliers.clone()
    }

    fn contracts(&self) -> Arc<dyn ContractRepository> {
        self.contracts.clone()
    }

    fn csi(&self) -> Arc<dyn CsiRepository> {
        self.csi.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Transaction-aware approval repository.
pub struct TxApprovalRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxApprovalRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Complete a stage: set the completion timestamp and result.
    ///
    /// A completed record is final; a second completion attempt fails.
    pub async fn complete(
        &self,
        purchase_request_id: i64,
        stage: &str,
        role: &str,
        result: Option<String>,
    ) -> AppResult<Approval> {
        use super::repositories::entities::purchase_approval::{self, Entity as ApprovalEntity};

        let model = ApprovalEntity::find()
            .filter(purchase_approval::Column::PurchaseRequestId.eq(purchase_request_id))
            .filter(purchase_approval::Column::Stage.eq(stage))
            .filter(purchase_approval::Column::Role.eq(role))
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        if model.completed_at.is_some() {
            return Err(AppError::validation("Approval stage is already completed"));
        }

        let mut active: purchase_approval::ActiveModel = model.into();
        active.completed_at = Set(Some(chrono::Utc::now()));
        active.result = Set(result);

        let model = active.update(self.txn).await?;
        Ok(Approval::from(model))
    }

    /// Count records of a request that are still open.
    pub async fn count_open(&self, purchase_request_id: i64) -> AppResult<u64> {
        use super::repositories::entities::purchase_approval::{self, Entity as ApprovalEntity};

        let count = ApprovalEntity::find()
            .filter(purchase_approval::Column::PurchaseRequestId.eq(purchase_request_id))
            .filter(purchase_approval::Column::CompletedAt.is_null())
            .count(self.txn)
            .await?;
        Ok(count)
    }
}

/// Transaction-aware purchase request repository.
pub struct TxRequestRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxRequestRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Overwrite the aggregate approval status of a request.
    pub async fn set_status(&self, id: i64, status: RequestStatus) -> AppResult<()> {
        use super::repositories::entities::purchase_request::{self, Entity as RequestEntity};

        let model = RequestEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: purchase_request::ActiveModel = model.into();
        active.status = Set(status.as_code().to_string());
        active.updated_at = Set(chrono::Utc::now());

        active.update(self.txn).await?;
        Ok(())
    }
}
