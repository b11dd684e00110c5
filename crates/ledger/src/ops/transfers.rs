use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    Allocation, AllocationState, BudgetMonth, CoverOverspendingCmd, LedgerError, Money,
    ResultLedger, Transaction, TransferAccountsCmd, TransferCategoriesCmd, allocations,
    transactions, util::{normalize_optional_text, parse_uuid},
};

use super::{Engine, with_tx};

impl Engine {
    /// Moves money between two accounts of the same family.
    ///
    /// The result is two paired transactions, equal in magnitude and
    /// opposite in sign, each holding the other account's id in
    /// `transfer_account_id`, both cleared. Both rows commit together or
    /// not at all.
    pub async fn transfer_between_accounts(
        &self,
        cmd: TransferAccountsCmd,
    ) -> ResultLedger<(Transaction, Transaction)> {
        if cmd.from_account_id == cmd.to_account_id {
            return Err(LedgerError::Validation(
                "from_account_id and to_account_id must differ".to_string(),
            ));
        }
        if !cmd.amount.is_positive() {
            return Err(LedgerError::Validation(
                "transfer amount must be > 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let from = self
                .require_account_in_family(&db_tx, cmd.family_id, cmd.from_account_id)
                .await?;
            let to = self
                .require_account_in_family(&db_tx, cmd.family_id, cmd.to_account_id)
                .await?;

            let notes = normalize_optional_text(cmd.notes.as_deref())
                .unwrap_or_else(|| format!("Transfer from {} to {}", from.name, to.name));

            let mut withdrawal = Transaction::new(
                cmd.family_id,
                cmd.from_account_id,
                cmd.date,
                -cmd.amount,
            );
            withdrawal.transfer_account_id = Some(cmd.to_account_id);
            withdrawal.cleared = true;
            withdrawal.notes = Some(notes.clone());

            let mut deposit =
                Transaction::new(cmd.family_id, cmd.to_account_id, cmd.date, cmd.amount);
            deposit.transfer_account_id = Some(cmd.from_account_id);
            deposit.cleared = true;
            deposit.notes = Some(notes);

            transactions::ActiveModel::from(&withdrawal)
                .insert(&db_tx)
                .await?;
            transactions::ActiveModel::from(&deposit)
                .insert(&db_tx)
                .await?;

            tracing::debug!(
                from = %cmd.from_account_id,
                to = %cmd.to_account_id,
                "account transfer of {}",
                cmd.amount
            );
            Ok((withdrawal, deposit))
        })
    }

    /// Moves budgeted money between two categories for one month.
    ///
    /// Zero-sum: the source allocation is decremented and the destination
    /// incremented by the same amount inside one DB transaction. A source
    /// with less budgeted than the requested amount fails the whole
    /// operation with `InsufficientFunds` and modifies neither side.
    pub async fn transfer_between_categories(
        &self,
        cmd: TransferCategoriesCmd,
    ) -> ResultLedger<(AllocationState, AllocationState)> {
        with_tx!(self, |db_tx| {
            self.transfer_between_categories_tx(
                &db_tx,
                cmd.family_id,
                cmd.from_category_id,
                cmd.to_category_id,
                cmd.amount,
                cmd.month,
                cmd.notes.as_deref(),
            )
            .await
        })
    }

    /// Covers an overspent category from another category's allocation.
    ///
    /// The stored budgeted amount is the overspend signal: a negative
    /// allocation is topped back up to zero from the source category.
    pub async fn cover_overspending(
        &self,
        cmd: CoverOverspendingCmd,
    ) -> ResultLedger<(AllocationState, AllocationState)> {
        with_tx!(self, |db_tx| {
            let overspent = self
                .require_category_in_family(&db_tx, cmd.family_id, cmd.overspent_category_id)
                .await?;

            let budgeted = self
                .find_allocation(&db_tx, cmd.family_id, cmd.overspent_category_id, cmd.month)
                .await?
                .map(|model| model.budgeted_minor)
                .unwrap_or(0);
            if budgeted >= 0 {
                return Err(LedgerError::Validation(format!(
                    "category \"{}\" is not overspent for {}",
                    overspent.name, cmd.month
                )));
            }

            let needed = Money::new(budgeted).abs();
            self.transfer_between_categories_tx(
                &db_tx,
                cmd.family_id,
                cmd.source_category_id,
                cmd.overspent_category_id,
                needed,
                cmd.month,
                None,
            )
            .await
        })
    }

    async fn transfer_between_categories_tx(
        &self,
        db_tx: &DatabaseTransaction,
        family_id: Uuid,
        from_category_id: Uuid,
        to_category_id: Uuid,
        amount: Money,
        month: BudgetMonth,
        notes: Option<&str>,
    ) -> ResultLedger<(AllocationState, AllocationState)> {
        if from_category_id == to_category_id {
            return Err(LedgerError::Validation(
                "from_category_id and to_category_id must differ".to_string(),
            ));
        }
        if !amount.is_positive() {
            return Err(LedgerError::Validation(
                "transfer amount must be > 0".to_string(),
            ));
        }

        let from_category = self
            .require_category_in_family(db_tx, family_id, from_category_id)
            .await?;
        self.require_category_in_family(db_tx, family_id, to_category_id)
            .await?;

        let from_alloc = self
            .load_or_create_allocation(db_tx, family_id, from_category_id, month)
            .await?;
        let to_alloc = self
            .load_or_create_allocation(db_tx, family_id, to_category_id, month)
            .await?;

        // The insufficient-funds check is part of the UPDATE itself, so it
        // is evaluated against the row value at write time. Two racing
        // transfers serialize on the row and the loser sees zero rows
        // affected; the enclosing transaction then rolls back, leaving both
        // allocations (including any lazily created ones) untouched.
        let debit = allocations::Entity::update_many()
            .col_expr(
                allocations::Column::BudgetedMinor,
                Expr::col(allocations::Column::BudgetedMinor).sub(amount.cents()),
            )
            .filter(allocations::Column::Id.eq(from_alloc.id.clone()))
            .filter(allocations::Column::BudgetedMinor.gte(amount.cents()))
            .exec(db_tx)
            .await?;
        if debit.rows_affected == 0 {
            return Err(LedgerError::InsufficientFunds {
                category: from_category.name,
                requested: amount,
                available: Money::new(from_alloc.budgeted_minor),
            });
        }

        allocations::Entity::update_many()
            .col_expr(
                allocations::Column::BudgetedMinor,
                Expr::col(allocations::Column::BudgetedMinor).add(amount.cents()),
            )
            .filter(allocations::Column::Id.eq(to_alloc.id.clone()))
            .exec(db_tx)
            .await?;

        if let Some(note) = normalize_optional_text(notes) {
            let appended = match to_alloc.notes.as_deref() {
                Some(existing) if !existing.is_empty() => format!("{existing}\n{note}"),
                _ => note,
            };
            let update = allocations::ActiveModel {
                id: ActiveValue::Set(to_alloc.id.clone()),
                notes: ActiveValue::Set(Some(appended)),
                ..Default::default()
            };
            update.update(db_tx).await?;
        }

        let from_state = self.allocation_state(db_tx, &from_alloc.id).await?;
        let to_state = self.allocation_state(db_tx, &to_alloc.id).await?;

        tracing::debug!(
            from = %from_category_id,
            to = %to_category_id,
            month = %month,
            "category transfer of {amount}"
        );
        Ok((from_state, to_state))
    }

    /// Loads the allocation for a (category, month) pair, creating it
    /// zero-initialized on first use.
    async fn load_or_create_allocation(
        &self,
        db_tx: &DatabaseTransaction,
        family_id: Uuid,
        category_id: Uuid,
        month: BudgetMonth,
    ) -> ResultLedger<allocations::Model> {
        if let Some(model) = self
            .find_allocation(db_tx, family_id, category_id, month)
            .await?
        {
            return Ok(model);
        }
        let allocation = Allocation::new(family_id, category_id, month);
        let model = allocations::ActiveModel::from(&allocation)
            .insert(db_tx)
            .await?;
        Ok(model)
    }

    async fn allocation_state(
        &self,
        db_tx: &DatabaseTransaction,
        allocation_id: &str,
    ) -> ResultLedger<AllocationState> {
        let model = allocations::Entity::find_by_id(allocation_id.to_string())
            .one(db_tx)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("allocation {allocation_id}")))?;
        Ok(AllocationState {
            id: parse_uuid(&model.id, "allocation")?,
            category_id: parse_uuid(&model.category_id, "category")?,
            budgeted: Money::new(model.budgeted_minor),
        })
    }
}
