//! Purchase plan repository: versions and items.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::plan_item::{self, Entity as PlanItemEntity};
use super::entities::plan_version::{self, Entity as PlanVersionEntity};
use super::map_insert_err;
use crate::domain::{PlanItem, PlanVersion};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Plan repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Highest version number for a year; 0 when no versions exist.
    async fn max_version_number(&self, year: i32) -> AppResult<i32>;

    /// Create version max+1 for the year. When `make_current`, the prior
    /// current version is flipped off in the same transaction.
    async fn create_version(&self, year: i32, make_current: bool) -> AppResult<PlanVersion>;

    async fn list_versions(&self, year: i32) -> AppResult<Vec<PlanVersion>>;

    async fn current_version(&self, year: i32) -> AppResult<Option<PlanVersion>>;

    async fn create_item(
        &self,
        year: i32,
        version_id: i64,
        subject: String,
        month: i16,
    ) -> AppResult<PlanItem>;

    async fn find_item_by_guid(&self, guid: Uuid) -> AppResult<Option<PlanItem>>;

    /// Case-insensitive purchase-subject lookup within a version.
    async fn find_item_by_subject(&self, version_id: i64, subject: &str)
        -> AppResult<Option<PlanItem>>;

    /// Current-version items of a year across the given months.
    async fn items_for_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItem>>;

    /// Conditional purchaser assignment: a single UPDATE predicated on the
    /// stored value. Returns rows affected; 0 when the value is unchanged
    /// or the guid is unknown.
    async fn assign_purchaser(&self, guid: Uuid, purchaser_id: Option<i64>) -> AppResult<u64>;
}

/// Version number that follows the current maximum (0 when none exist).
pub fn next_version_number(max: Option<i32>) -> i32 {
    max.unwrap_or(0) + 1
}

/// SeaORM-backed implementation of `PlanRepository`
pub struct PlanStore {
    db: DatabaseConnection,
}

impl PlanStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn max_version_on<C: ConnectionTrait>(conn: &C, year: i32) -> AppResult<i32> {
        let latest = PlanVersionEntity::find()
            .filter(plan_version::Column::Year.eq(year))
            .order_by_desc(plan_version::Column::VersionNumber)
            .one(conn)
            .await?;
        Ok(latest.map(|v| v.version_number).unwrap_or(0))
    }
}

#[async_trait]
impl PlanRepository for PlanStore {
    async fn max_version_number(&self, year: i32) -> AppResult<i32> {
        Self::max_version_on(&self.db, year).await
    }

    async fn create_version(&self, year: i32, make_current: bool) -> AppResult<PlanVersion> {
        // Serializable so two concurrent creates cannot read the same max or
        // leave zero/two current versions for the year.
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::Serializable),
                Some(AccessMode::ReadWrite),
            )
            .await?;

        let result: AppResult<PlanVersion> = async {
            let number = next_version_number(Some(Self::max_version_on(&txn, year).await?));

            if make_current {
                // Flip the prior current version off; predicated on the old
                // value so the statement is a no-op when none is current.
                PlanVersionEntity::update_many()
                    .col_expr(plan_version::Column::IsCurrent, Expr::value(false))
                    .filter(plan_version::Column::Year.eq(year))
                    .filter(plan_version::Column::IsCurrent.eq(true))
                    .exec(&txn)
                    .await?;
            }

            let active = plan_version::ActiveModel {
                year: Set(year),
                version_number: Set(number),
                is_current: Set(make_current),
                created_at: Set(chrono::Utc::now()),
                ..Default::default()
            };

            let model = active
                .insert(&txn)
                .await
                .map_err(|e| map_insert_err("Plan version", e))?;
            Ok(PlanVersion::from(model))
        }
        .await;

        match result {
            Ok(version) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(version)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Plan version rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn list_versions(&self, year: i32) -> AppResult<Vec<PlanVersion>> {
        let models = PlanVersionEntity::find()
            .filter(plan_version::Column::Year.eq(year))
            .order_by_asc(plan_version::Column::VersionNumber)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(PlanVersion::from).collect())
    }

    async fn current_version(&self, year: i32) -> AppResult<Option<PlanVersion>> {
        let model = PlanVersionEntity::find()
            .filter(plan_version::Column::Year.eq(year))
            .filter(plan_version::Column::IsCurrent.eq(true))
            .one(&self.db)
            .await?;
        Ok(model.map(PlanVersion::from))
    }

    async fn create_item(
        &self,
        year: i32,
        version_id: i64,
        subject: String,
        month: i16,
    ) -> AppResult<PlanItem> {
        let now = chrono::Utc::now();
        let active = plan_item::ActiveModel {
            guid: Set(Uuid::new_v4()),
            year: Set(year),
            version_id: Set(version_id),
            subject: Set(subject),
            month: Set(month),
            purchaser_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_err("Plan item", e))?;
        Ok(PlanItem::from(model))
    }

    async fn find_item_by_guid(&self, guid: Uuid) -> AppResult<Option<PlanItem>> {
        let model = PlanItemEntity::find()
            .filter(plan_item::Column::Guid.eq(guid))
            .one(&self.db)
            .await?;
        Ok(model.map(PlanItem::from))
    }

    async fn find_item_by_subject(
        &self,
        version_id: i64,
        subject: &str,
    ) -> AppResult<Option<PlanItem>> {
        let model = PlanItemEntity::find()
            .filter(plan_item::Column::VersionId.eq(version_id))
            .filter(
                Expr::expr(Func::lower(Expr::col(plan_item::Column::Subject)))
                    .eq(subject.to_lowercase()),
            )
            .one(&self.db)
            .await?;
        Ok(model.map(PlanItem::from))
    }

    async fn items_for_months(&self, year: i32, months: Vec<i16>) -> AppResult<Vec<PlanItem>> {
        let current = match self.current_version(year).await? {
            Some(version) => version,
            None => return Ok(Vec::new()),
        };

        let mut query = PlanItemEntity::find()
            .filter(plan_item::Column::VersionId.eq(current.id));
        if !months.is_empty() {
            query = query.filter(plan_item::Column::Month.is_in(months));
        }

        let models = query
            .order_by_asc(plan_item::Column::Month)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(PlanItem::from).collect())
    }

    async fn assign_purchaser(&self, guid: Uuid, purchaser_id: Option<i64>) -> AppResult<u64> {
        // Value-changed predicate makes the statement report zero rows when
        // the stored purchaser already equals the new one.
        let changed = match purchaser_id {
            Some(id) => Condition::any()
                .add(plan_item::Column::PurchaserId.is_null())
                .add(plan_item::Column::PurchaserId.ne(id)),
            None => Condition::all().add(plan_item::Column::PurchaserId.is_not_null()),
        };

        let result = PlanItemEntity::update_many()
            .col_expr(plan_item::Column::PurchaserId, Expr::value(purchaser_id))
            .col_expr(
                plan_item::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(plan_item::Column::Guid.eq(guid))
            .filter(changed)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::next_version_number;

    #[test]
    fn first_version_is_one() {
        assert_eq!(next_version_number(None), 1);
        assert_eq!(next_version_number(Some(0)), 1);
    }

    #[test]
    fn version_numbers_are_monotonic() {
        assert_eq!(next_version_number(Some(1)), 2);
        assert_eq!(next_version_number(Some(41)), 42);
    }
}
