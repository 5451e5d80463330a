//! Migration: Create payment, supplier, contract and CSI feedback tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Suppliers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Suppliers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Suppliers::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Suppliers::Name).string().not_null())
                    .col(ColumnDef::new(Suppliers::Inn).string().null())
                    .col(ColumnDef::new(Suppliers::Kpp).string().null())
                    .col(
                        ColumnDef::new(Suppliers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // inn/kpp lookups drive contract matching
        manager
            .create_index(
                Index::create()
                    .name("idx_suppliers_inn")
                    .table(Suppliers::Table)
                    .col(Suppliers::Inn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::PurchaseRequestId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Payments::Cfo).string().not_null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(ColumnDef::new(Payments::RequestStatus).string().null())
                    .col(ColumnDef::new(Payments::PlannedDate).date().null())
                    .col(ColumnDef::new(Payments::ActualDate).date().null())
                    .col(ColumnDef::new(Payments::ExecutorId).uuid().null())
                    .col(ColumnDef::new(Payments::ResponsibleId).uuid().null())
                    .col(ColumnDef::new(Payments::Comment).text().null())
                    .col(
                        ColumnDef::new(Payments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Contracts::Number)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Contracts::SupplierId).big_integer().null())
                    .col(
                        ColumnDef::new(Contracts::PurchaseRequestId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Contracts::Subject).string().null())
                    .col(ColumnDef::new(Contracts::Amount).double().null())
                    .col(ColumnDef::new(Contracts::ConcludedAt).date().null())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_supplier")
                            .from(Contracts::Table, Contracts::SupplierId)
                            .to(Suppliers::Table, Suppliers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CsiFeedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CsiFeedback::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CsiFeedback::PurchaseRequestId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CsiFeedback::Rating).small_integer().not_null())
                    .col(ColumnDef::new(CsiFeedback::Comment).text().null())
                    .col(
                        ColumnDef::new(CsiFeedback::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CsiFeedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_suppliers_inn")
                    .table(Suppliers::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Suppliers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Suppliers {
    Table,
    Id,
    Code,
    Name,
    Inn,
    Kpp,
    CreatedAt,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    PurchaseRequestId,
    Cfo,
    Status,
    RequestStatus,
    PlannedDate,
    ActualDate,
    ExecutorId,
    ResponsibleId,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Contracts {
    Table,
    Id,
    Number,
    SupplierId,
    PurchaseRequestId,
    Subject,
    Amount,
    ConcludedAt,
    CreatedAt,
}

#[derive(Iden)]
enum CsiFeedback {
    Table,
    Id,
    PurchaseRequestId,
    Rating,
    Comment,
    SubmittedAt,
}
