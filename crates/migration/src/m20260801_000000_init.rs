//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Hearth:
//!
//! - `families`: tenant boundary; everything below belongs to one family
//! - `category_groups`: income/expense partitions of categories
//! - `categories`: spending envelopes
//! - `accounts`: money locations (checking, savings, credit, ...)
//! - `payees`: descriptive transaction counterparties
//! - `transactions`: signed ledger rows, including transfer legs and splits
//! - `allocations`: monthly budgeted amounts, one row per (category, month)

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Families {
    Table,
    Id,
    Name,
    Currency,
}

#[derive(Iden)]
enum CategoryGroups {
    Table,
    Id,
    FamilyId,
    Name,
    SortOrder,
    IsIncome,
    Hidden,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    FamilyId,
    GroupId,
    Name,
    SortOrder,
    Hidden,
    RolloverEnabled,
    GoalAmountMinor,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    FamilyId,
    Name,
    Kind,
    Offbudget,
    Closed,
    StartingBalanceMinor,
    SortOrder,
}

#[derive(Iden)]
enum Payees {
    Table,
    Id,
    FamilyId,
    Name,
    Notes,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    FamilyId,
    AccountId,
    Date,
    AmountMinor,
    PayeeId,
    CategoryId,
    Notes,
    Cleared,
    Reconciled,
    ImportedId,
    ParentId,
    IsParent,
    TransferAccountId,
}

#[derive(Iden)]
enum Allocations {
    Table,
    Id,
    FamilyId,
    CategoryId,
    Month,
    BudgetedMinor,
    Notes,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Families
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Families::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Families::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Families::Name).string().not_null())
                    .col(
                        ColumnDef::new(Families::Currency)
                            .string()
                            .not_null()
                            .default("USD"),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Category groups
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(CategoryGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryGroups::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CategoryGroups::FamilyId).string().not_null())
                    .col(ColumnDef::new(CategoryGroups::Name).string().not_null())
                    .col(
                        ColumnDef::new(CategoryGroups::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CategoryGroups::IsIncome).boolean().not_null())
                    .col(ColumnDef::new(CategoryGroups::Hidden).boolean().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-category_groups-family_id")
                            .from(CategoryGroups::Table, CategoryGroups::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-category_groups-family_id-name-unique")
                    .table(CategoryGroups::Table)
                    .col(CategoryGroups::FamilyId)
                    .col(CategoryGroups::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::FamilyId).string().not_null())
                    .col(ColumnDef::new(Categories::GroupId).string().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(
                        ColumnDef::new(Categories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Categories::Hidden).boolean().not_null())
                    .col(
                        ColumnDef::new(Categories::RolloverEnabled)
                            .boolean()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Categories::GoalAmountMinor).big_integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-family_id")
                            .from(Categories::Table, Categories::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-group_id")
                            .from(Categories::Table, Categories::GroupId)
                            .to(CategoryGroups::Table, CategoryGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-group_id-name-unique")
                    .table(Categories::Table)
                    .col(Categories::GroupId)
                    .col(Categories::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::FamilyId).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Kind).string().not_null())
                    .col(ColumnDef::new(Accounts::Offbudget).boolean().not_null())
                    .col(ColumnDef::new(Accounts::Closed).boolean().not_null())
                    .col(
                        ColumnDef::new(Accounts::StartingBalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-family_id")
                            .from(Accounts::Table, Accounts::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-family_id")
                    .table(Accounts::Table)
                    .col(Accounts::FamilyId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Payees
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Payees::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Payees::FamilyId).string().not_null())
                    .col(ColumnDef::new(Payees::Name).string().not_null())
                    .col(ColumnDef::new(Payees::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payees-family_id")
                            .from(Payees::Table, Payees::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::FamilyId).string().not_null())
                    .col(ColumnDef::new(Transactions::AccountId).string().not_null())
                    .col(ColumnDef::new(Transactions::Date).date().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::PayeeId).string())
                    .col(ColumnDef::new(Transactions::CategoryId).string())
                    .col(ColumnDef::new(Transactions::Notes).string())
                    .col(ColumnDef::new(Transactions::Cleared).boolean().not_null())
                    .col(ColumnDef::new(Transactions::Reconciled).boolean().not_null())
                    .col(ColumnDef::new(Transactions::ImportedId).string())
                    .col(ColumnDef::new(Transactions::ParentId).string())
                    .col(ColumnDef::new(Transactions::IsParent).boolean().not_null())
                    .col(ColumnDef::new(Transactions::TransferAccountId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-family_id")
                            .from(Transactions::Table, Transactions::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-account_id")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-family_id-date")
                    .table(Transactions::Table)
                    .col(Transactions::FamilyId)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-account_id-imported_id")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .col(Transactions::ImportedId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-category_id")
                    .table(Transactions::Table)
                    .col(Transactions::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Allocations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Allocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Allocations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Allocations::FamilyId).string().not_null())
                    .col(ColumnDef::new(Allocations::CategoryId).string().not_null())
                    .col(ColumnDef::new(Allocations::Month).date().not_null())
                    .col(
                        ColumnDef::new(Allocations::BudgetedMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Allocations::Notes).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-allocations-family_id")
                            .from(Allocations::Table, Allocations::FamilyId)
                            .to(Families::Table, Families::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-allocations-category_id")
                            .from(Allocations::Table, Allocations::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-allocations-category_id-month-unique")
                    .table(Allocations::Table)
                    .col(Allocations::CategoryId)
                    .col(Allocations::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Allocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CategoryGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Families::Table).to_owned())
            .await?;
        Ok(())
    }
}
