//! Command structs for engine operations.
//!
//! These types group parameters for write operations (account creation,
//! transaction entry, transfers), keeping call sites readable and avoiding
//! long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{AccountKind, BudgetMonth, Money};

/// Create an account, materializing its starting balance if non-zero.
#[derive(Clone, Debug)]
pub struct CreateAccountCmd {
    pub family_id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub offbudget: bool,
    pub starting_balance: Money,
    pub opened_on: NaiveDate,
    pub sort_order: i32,
}

impl CreateAccountCmd {
    #[must_use]
    pub fn new(family_id: Uuid, name: impl Into<String>, kind: AccountKind, opened_on: NaiveDate) -> Self {
        Self {
            family_id,
            name: name.into(),
            kind,
            offbudget: false,
            starting_balance: Money::ZERO,
            opened_on,
            sort_order: 0,
        }
    }

    #[must_use]
    pub fn offbudget(mut self, offbudget: bool) -> Self {
        self.offbudget = offbudget;
        self
    }

    #[must_use]
    pub fn starting_balance(mut self, amount: Money) -> Self {
        self.starting_balance = amount;
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Create a category inside a group.
#[derive(Clone, Debug)]
pub struct CreateCategoryCmd {
    pub family_id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub rollover_enabled: bool,
    pub sort_order: i32,
    pub goal_amount: Option<Money>,
}

impl CreateCategoryCmd {
    #[must_use]
    pub fn new(family_id: Uuid, group_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            family_id,
            group_id,
            name: name.into(),
            rollover_enabled: false,
            sort_order: 0,
            goal_amount: None,
        }
    }

    #[must_use]
    pub fn rollover_enabled(mut self, enabled: bool) -> Self {
        self.rollover_enabled = enabled;
        self
    }

    #[must_use]
    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    #[must_use]
    pub fn goal_amount(mut self, amount: Money) -> Self {
        self.goal_amount = Some(amount);
        self
    }
}

/// Create a single ledger transaction.
#[derive(Clone, Debug)]
pub struct CreateTransactionCmd {
    pub family_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub amount: Money,
    pub category_id: Option<Uuid>,
    pub payee_id: Option<Uuid>,
    pub notes: Option<String>,
    pub cleared: bool,
    pub imported_id: Option<String>,
}

impl CreateTransactionCmd {
    #[must_use]
    pub fn new(family_id: Uuid, account_id: Uuid, date: NaiveDate, amount: Money) -> Self {
        Self {
            family_id,
            account_id,
            date,
            amount,
            category_id: None,
            payee_id: None,
            notes: None,
            cleared: false,
            imported_id: None,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn payee_id(mut self, payee_id: Uuid) -> Self {
        self.payee_id = Some(payee_id);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn cleared(mut self, cleared: bool) -> Self {
        self.cleared = cleared;
        self
    }

    /// External dedup key: re-sending the same (account, imported_id)
    /// returns the existing transaction instead of inserting a second one.
    #[must_use]
    pub fn imported_id(mut self, imported_id: impl Into<String>) -> Self {
        self.imported_id = Some(imported_id.into());
        self
    }
}

/// One category-tagged line of a split transaction.
#[derive(Clone, Debug)]
pub struct SplitLine {
    pub amount: Money,
    pub category_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl SplitLine {
    #[must_use]
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            category_id: None,
            notes: None,
        }
    }

    #[must_use]
    pub fn category_id(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Create a split transaction: a parent row plus category-tagged children
/// whose amounts sum to the parent amount.
#[derive(Clone, Debug)]
pub struct CreateSplitCmd {
    pub family_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub payee_id: Option<Uuid>,
    pub notes: Option<String>,
    pub cleared: bool,
    pub splits: Vec<SplitLine>,
}

impl CreateSplitCmd {
    #[must_use]
    pub fn new(family_id: Uuid, account_id: Uuid, date: NaiveDate, splits: Vec<SplitLine>) -> Self {
        Self {
            family_id,
            account_id,
            date,
            payee_id: None,
            notes: None,
            cleared: false,
            splits,
        }
    }

    #[must_use]
    pub fn payee_id(mut self, payee_id: Uuid) -> Self {
        self.payee_id = Some(payee_id);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn cleared(mut self, cleared: bool) -> Self {
        self.cleared = cleared;
        self
    }
}

/// Move money between two accounts (two paired transactions).
#[derive(Clone, Debug)]
pub struct TransferAccountsCmd {
    pub family_id: Uuid,
    pub from_account_id: Uuid,
    pub to_account_id: Uuid,
    pub amount: Money,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

impl TransferAccountsCmd {
    #[must_use]
    pub fn new(
        family_id: Uuid,
        from_account_id: Uuid,
        to_account_id: Uuid,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            family_id,
            from_account_id,
            to_account_id,
            amount,
            date,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Move budgeted money between two categories for one month (zero-sum).
#[derive(Clone, Debug)]
pub struct TransferCategoriesCmd {
    pub family_id: Uuid,
    pub from_category_id: Uuid,
    pub to_category_id: Uuid,
    pub amount: Money,
    pub month: BudgetMonth,
    pub notes: Option<String>,
}

impl TransferCategoriesCmd {
    #[must_use]
    pub fn new(
        family_id: Uuid,
        from_category_id: Uuid,
        to_category_id: Uuid,
        amount: Money,
        month: BudgetMonth,
    ) -> Self {
        Self {
            family_id,
            from_category_id,
            to_category_id,
            amount,
            month,
            notes: None,
        }
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Cover an overspent category from another category's allocation.
#[derive(Clone, Debug)]
pub struct CoverOverspendingCmd {
    pub family_id: Uuid,
    pub overspent_category_id: Uuid,
    pub source_category_id: Uuid,
    pub month: BudgetMonth,
}

impl CoverOverspendingCmd {
    #[must_use]
    pub fn new(
        family_id: Uuid,
        overspent_category_id: Uuid,
        source_category_id: Uuid,
        month: BudgetMonth,
    ) -> Self {
        Self {
            family_id,
            overspent_category_id,
            source_category_id,
            month,
        }
    }
}
