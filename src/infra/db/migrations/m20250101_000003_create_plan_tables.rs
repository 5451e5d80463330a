//! Migration: Create purchase plan version and item tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlanVersions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlanVersions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlanVersions::Year).integer().not_null())
                    .col(
                        ColumnDef::new(PlanVersions::VersionNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanVersions::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(PlanVersions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_plan_versions_year_number")
                    .table(PlanVersions::Table)
                    .col(PlanVersions::Year)
                    .col(PlanVersions::VersionNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PlanItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlanItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlanItems::Guid)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(PlanItems::Year).integer().not_null())
                    .col(ColumnDef::new(PlanItems::VersionId).big_integer().not_null())
                    .col(ColumnDef::new(PlanItems::Subject).string().not_null())
                    .col(ColumnDef::new(PlanItems::Month).small_integer().not_null())
                    .col(ColumnDef::new(PlanItems::PurchaserId).big_integer().null())
                    .col(
                        ColumnDef::new(PlanItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_plan_items_version")
                            .from(PlanItems::Table, PlanItems::VersionId)
                            .to(PlanVersions::Table, PlanVersions::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlanItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlanVersions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PlanVersions {
    Table,
    Id,
    Year,
    VersionNumber,
    IsCurrent,
    CreatedAt,
}

#[derive(Iden)]
enum PlanItems {
    Table,
    Id,
    Guid,
    Year,
    VersionId,
    Subject,
    Month,
    PurchaserId,
    CreatedAt,
    UpdatedAt,
}
