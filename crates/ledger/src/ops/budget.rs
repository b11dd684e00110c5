//! Ready-to-assign aggregates.
//!
//! Four read-only sums over the ledger, composable into the unassigned
//! funds figure. They never mutate state; the only failure mode is a
//! storage error, which propagates as `LedgerError::Database`.

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Statement};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BudgetMonth, Money, ResultLedger};

use super::Engine;

/// Breakdown of the ready-to-assign computation for one month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyToAssign {
    /// Cash across on-budget, open accounts as of the reference date.
    pub on_budget_balance: Money,
    /// Expense envelopes funded for the month itself.
    pub budgeted_this_month: Money,
    /// Expense envelopes funded in all earlier months.
    pub prior_budgeted: Money,
    /// Categorized expense activity in all earlier months (negative for
    /// outflows).
    pub prior_activity: Money,
    /// Money not yet assigned to any envelope.
    pub available: Money,
}

impl Engine {
    /// Sum of transaction amounts on on-budget, open accounts with date on
    /// or before `as_of`.
    ///
    /// Uncategorized transactions count: the balance tracks cash, not
    /// categorization. Split children are skipped since the parent row
    /// already carries the full amount.
    pub async fn total_on_budget_balance(
        &self,
        family_id: Uuid,
        as_of: NaiveDate,
    ) -> ResultLedger<Money> {
        self.sum_query(
            "SELECT COALESCE(SUM(t.amount_minor), 0) AS total \
             FROM transactions t \
             INNER JOIN accounts a ON a.id = t.account_id \
             WHERE t.family_id = ? \
               AND a.offbudget = 0 \
               AND a.closed = 0 \
               AND t.parent_id IS NULL \
               AND t.date <= ?",
            vec![family_id.to_string().into(), as_of.into()],
        )
        .await
    }

    /// Sum of budgeted amounts over expense-group allocations for `month`.
    pub async fn total_expense_budgeted_for_month(
        &self,
        family_id: Uuid,
        month: BudgetMonth,
    ) -> ResultLedger<Money> {
        self.sum_query(
            "SELECT COALESCE(SUM(al.budgeted_minor), 0) AS total \
             FROM allocations al \
             INNER JOIN categories c ON c.id = al.category_id \
             INNER JOIN category_groups g ON g.id = c.group_id \
             WHERE al.family_id = ? \
               AND g.is_income = 0 \
               AND al.month = ?",
            vec![family_id.to_string().into(), month.first_day().into()],
        )
        .await
    }

    /// Sum of budgeted amounts over expense-group allocations for all
    /// months strictly before `month`.
    pub async fn total_expense_budgeted_before_month(
        &self,
        family_id: Uuid,
        month: BudgetMonth,
    ) -> ResultLedger<Money> {
        self.sum_query(
            "SELECT COALESCE(SUM(al.budgeted_minor), 0) AS total \
             FROM allocations al \
             INNER JOIN categories c ON c.id = al.category_id \
             INNER JOIN category_groups g ON g.id = c.group_id \
             WHERE al.family_id = ? \
               AND g.is_income = 0 \
               AND al.month < ?",
            vec![family_id.to_string().into(), month.first_day().into()],
        )
        .await
    }

    /// Sum of transaction amounts attributed to expense-group categories,
    /// dated strictly before the first day of `month`.
    ///
    /// Uncategorized rows and income-group categories are excluded here;
    /// split parents are skipped since the categories live on the children.
    pub async fn total_expense_activity_before_month(
        &self,
        family_id: Uuid,
        month: BudgetMonth,
    ) -> ResultLedger<Money> {
        self.sum_query(
            "SELECT COALESCE(SUM(t.amount_minor), 0) AS total \
             FROM transactions t \
             INNER JOIN accounts a ON a.id = t.account_id \
             INNER JOIN categories c ON c.id = t.category_id \
             INNER JOIN category_groups g ON g.id = c.group_id \
             WHERE t.family_id = ? \
               AND a.offbudget = 0 \
               AND t.is_parent = 0 \
               AND g.is_income = 0 \
               AND t.date < ?",
            vec![family_id.to_string().into(), month.first_day().into()],
        )
        .await
    }

    /// Money not yet assigned to any envelope:
    ///
    /// ```text
    /// on-budget balance
    ///   - this month's expense envelopes
    ///   - (prior months' envelopes + prior months' expense activity)
    /// ```
    ///
    /// Activity is stored negative for outflows, so the parenthesized term
    /// is the net carried-forward position of earlier months. Income-group
    /// allocations and activity never enter any term.
    pub async fn ready_to_assign(
        &self,
        family_id: Uuid,
        month: BudgetMonth,
        as_of: NaiveDate,
    ) -> ResultLedger<ReadyToAssign> {
        let on_budget_balance = self.total_on_budget_balance(family_id, as_of).await?;
        let budgeted_this_month = self
            .total_expense_budgeted_for_month(family_id, month)
            .await?;
        let prior_budgeted = self
            .total_expense_budgeted_before_month(family_id, month)
            .await?;
        let prior_activity = self
            .total_expense_activity_before_month(family_id, month)
            .await?;

        let available =
            on_budget_balance - budgeted_this_month - (prior_budgeted + prior_activity);

        Ok(ReadyToAssign {
            on_budget_balance,
            budgeted_this_month,
            prior_budgeted,
            prior_activity,
            available,
        })
    }

    async fn sum_query(
        &self,
        sql: &str,
        values: Vec<sea_orm::Value>,
    ) -> ResultLedger<Money> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(backend, sql, values);
        let row = self.database.query_one(stmt).await?;
        let total: i64 = row.and_then(|r| r.try_get("", "total").ok()).unwrap_or(0);
        Ok(Money::new(total))
    }
}
