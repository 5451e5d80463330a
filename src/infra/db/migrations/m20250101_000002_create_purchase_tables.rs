//! Migration: Create purchase request and approval tables.
//!
//! Approval uniqueness per (request, stage, role) lives here as a composite
//! unique index rather than in application logic.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PurchaseRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::ExternalId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PurchaseRequests::Subject).string().null())
                    .col(ColumnDef::new(PurchaseRequests::Status).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseRequests::CsiToken)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseApprovals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseApprovals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PurchaseApprovals::PurchaseRequestId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseApprovals::Stage).string().not_null())
                    .col(ColumnDef::new(PurchaseApprovals::Role).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseApprovals::Strategic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PurchaseApprovals::AssignedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseApprovals::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(PurchaseApprovals::Result).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_purchase_approvals_request")
                            .from(PurchaseApprovals::Table, PurchaseApprovals::PurchaseRequestId)
                            .to(PurchaseRequests::Table, PurchaseRequests::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_purchase_approvals_request_stage_role")
                    .table(PurchaseApprovals::Table)
                    .col(PurchaseApprovals::PurchaseRequestId)
                    .col(PurchaseApprovals::Stage)
                    .col(PurchaseApprovals::Role)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PurchaseApprovals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PurchaseRequests {
    Table,
    Id,
    ExternalId,
    Subject,
    Status,
    CsiToken,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PurchaseApprovals {
    Table,
    Id,
    PurchaseRequestId,
    Stage,
    Role,
    Strategic,
    AssignedAt,
    CompletedAt,
    Result,
}
