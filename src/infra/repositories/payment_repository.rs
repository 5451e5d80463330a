//! Payment repository with filtered, sorted listing.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::payment::{self, Entity as PaymentEntity};
use crate::domain::{Payment, PaymentStatus};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sort direction for listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortDir::Desc
        } else {
            SortDir::Asc
        }
    }
}

/// Filter and ordering for the payment listing
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub cfo: Option<String>,
    /// Substring match on the comment field
    pub comment: Option<String>,
    /// Only payments linked to a purchase request
    pub linked_only: bool,
    pub sort_by: Option<String>,
    pub sort_desc: bool,
}

/// New payment fields
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub purchase_request_id: Option<i64>,
    pub cfo: String,
    pub status: PaymentStatus,
    pub request_status: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub executor_id: Option<Uuid>,
    pub responsible_id: Option<Uuid>,
    pub comment: Option<String>,
}

/// Payment repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list(
        &self,
        filter: PaymentFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Payment>, u64)>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>>;

    async fn create(&self, payment: NewPayment) -> AppResult<Payment>;

    async fn set_status(
        &self,
        id: i64,
        status: PaymentStatus,
        actual_date: Option<NaiveDate>,
    ) -> AppResult<Payment>;
}

/// Whitelisted sort columns; anything else falls back to creation time.
fn sort_column(name: &str) -> payment::Column {
    match name {
        "planned_date" => payment::Column::PlannedDate,
        "actual_date" => payment::Column::ActualDate,
        "status" => payment::Column::Status,
        "cfo" => payment::Column::Cfo,
        _ => payment::Column::CreatedAt,
    }
}

/// SeaORM-backed implementation of `PaymentRepository`
pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn list(
        &self,
        filter: PaymentFilter,
        params: PaginationParams,
    ) -> AppResult<(Vec<Payment>, u64)> {
        let mut query = PaymentEntity::find();

        if let Some(cfo) = filter.cfo {
            query = query.filter(payment::Column::Cfo.eq(cfo));
        }
        if let Some(comment) = filter.comment {
            query = query.filter(payment::Column::Comment.contains(&comment));
        }
        if filter.linked_only {
            query = query.filter(payment::Column::PurchaseRequestId.is_not_null());
        }

        let column = sort_column(filter.sort_by.as_deref().unwrap_or(""));
        let order = if filter.sort_desc { Order::Desc } else { Order::Asc };
        let paginator = query.order_by(column, order).paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Payment::from).collect(), total))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Payment>> {
        let model = PaymentEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Payment::from))
    }

    async fn create(&self, new: NewPayment) -> AppResult<Payment> {
        let active = payment::ActiveModel {
            purchase_request_id: Set(new.purchase_request_id),
            cfo: Set(new.cfo),
            status: Set(new.status.as_code().to_string()),
            request_status: Set(new.request_status),
            planned_date: Set(new.planned_date),
            actual_date: Set(None),
            executor_id: Set(new.executor_id),
            responsible_id: Set(new.responsible_id),
            comment: Set(new.comment),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(Payment::from(model))
    }

    async fn set_status(
        &self,
        id: i64,
        status: PaymentStatus,
        actual_date: Option<NaiveDate>,
    ) -> AppResult<Payment> {
        let model = PaymentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: payment::ActiveModel = model.into();
        active.status = Set(status.as_code().to_string());
        if actual_date.is_some() {
            active.actual_date = Set(actual_date);
        }

        let model = active.update(&self.db).await?;
        Ok(Payment::from(model))
    }
}
