//! Hearth ledger engine: envelope budgeting over a relational store.
//!
//! The engine tracks family money across accounts and spending categories,
//! enforces zero-sum budget allocation, and computes the amount of money
//! not yet assigned to any category. Every write operation runs as one
//! database transaction; every read and write is scoped to a family
//! (tenant).

pub use accounts::{Account, AccountKind};
pub use allocations::{Allocation, AllocationState};
pub use categories::Category;
pub use category_groups::CategoryGroup;
pub use commands::{
    CoverOverspendingCmd, CreateAccountCmd, CreateCategoryCmd, CreateSplitCmd,
    CreateTransactionCmd, SplitLine, TransferAccountsCmd, TransferCategoriesCmd,
};
pub use currency::Currency;
pub use error::LedgerError;
pub use families::Family;
pub use money::Money;
pub use month::BudgetMonth;
pub use ops::{Engine, EngineBuilder, LedgerConfig, ReadyToAssign};
pub use payees::Payee;
pub use transactions::Transaction;
pub use util::parse_date;

mod accounts;
mod allocations;
mod categories;
mod category_groups;
mod commands;
mod currency;
mod error;
mod families;
mod money;
mod month;
mod ops;
mod payees;
mod transactions;
mod util;

type ResultLedger<T> = Result<T, LedgerError>;
