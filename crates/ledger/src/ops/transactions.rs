use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    CreateSplitCmd, CreateTransactionCmd, LedgerError, Money, ResultLedger, Transaction,
    transactions, util::normalize_optional_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates a single ledger transaction.
    ///
    /// If `imported_id` is set and a transaction with the same
    /// (account, imported_id) pair already exists, that row is returned
    /// unchanged instead of inserting a duplicate.
    pub async fn create_transaction(
        &self,
        cmd: CreateTransactionCmd,
    ) -> ResultLedger<Transaction> {
        if cmd.amount.is_zero() {
            return Err(LedgerError::Validation(
                "amount must not be 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.require_account_in_family(&db_tx, cmd.family_id, cmd.account_id)
                .await?;
            if let Some(category_id) = cmd.category_id {
                self.require_category_in_family(&db_tx, cmd.family_id, category_id)
                    .await?;
            }
            if let Some(payee_id) = cmd.payee_id {
                self.require_payee_in_family(&db_tx, cmd.family_id, payee_id)
                    .await?;
            }

            if let Some(imported_id) = cmd.imported_id.as_deref() {
                let existing = transactions::Entity::find()
                    .filter(transactions::Column::AccountId.eq(cmd.account_id.to_string()))
                    .filter(transactions::Column::ImportedId.eq(imported_id.to_string()))
                    .one(&db_tx)
                    .await?;
                if let Some(existing) = existing {
                    return Transaction::try_from(existing);
                }
            }

            let mut tx = Transaction::new(cmd.family_id, cmd.account_id, cmd.date, cmd.amount);
            tx.category_id = cmd.category_id;
            tx.payee_id = cmd.payee_id;
            tx.notes = normalize_optional_text(cmd.notes.as_deref());
            tx.cleared = cmd.cleared;
            tx.imported_id = cmd.imported_id;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    /// Creates a split transaction: one parent row whose amount is the sum
    /// of its category-tagged children.
    pub async fn create_split_transaction(
        &self,
        cmd: CreateSplitCmd,
    ) -> ResultLedger<Transaction> {
        if cmd.splits.len() < 2 {
            return Err(LedgerError::Validation(
                "a split needs at least two lines".to_string(),
            ));
        }
        if cmd.splits.iter().any(|line| line.amount.is_zero()) {
            return Err(LedgerError::Validation(
                "split line amount must not be 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.require_account_in_family(&db_tx, cmd.family_id, cmd.account_id)
                .await?;
            if let Some(payee_id) = cmd.payee_id {
                self.require_payee_in_family(&db_tx, cmd.family_id, payee_id)
                    .await?;
            }
            for line in &cmd.splits {
                if let Some(category_id) = line.category_id {
                    self.require_category_in_family(&db_tx, cmd.family_id, category_id)
                        .await?;
                }
            }

            let total = cmd
                .splits
                .iter()
                .try_fold(Money::ZERO, |acc, line| acc.checked_add(line.amount))
                .ok_or_else(|| LedgerError::Validation("split total overflows".to_string()))?;

            let mut parent = Transaction::new(cmd.family_id, cmd.account_id, cmd.date, total);
            parent.is_parent = true;
            parent.payee_id = cmd.payee_id;
            parent.notes = normalize_optional_text(cmd.notes.as_deref());
            parent.cleared = cmd.cleared;
            transactions::ActiveModel::from(&parent)
                .insert(&db_tx)
                .await?;

            for line in &cmd.splits {
                let mut child =
                    Transaction::new(cmd.family_id, cmd.account_id, cmd.date, line.amount);
                child.parent_id = Some(parent.id);
                child.category_id = line.category_id;
                child.payee_id = cmd.payee_id;
                child.notes = normalize_optional_text(line.notes.as_deref());
                child.cleared = cmd.cleared;
                transactions::ActiveModel::from(&child)
                    .insert(&db_tx)
                    .await?;
            }

            Ok(parent)
        })
    }

    pub async fn transaction(
        &self,
        family_id: Uuid,
        transaction_id: Uuid,
    ) -> ResultLedger<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .filter(transactions::Column::FamilyId.eq(family_id.to_string()))
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {transaction_id}")))?;
        Transaction::try_from(model)
    }

    /// Lists recent transactions on an account, newest first.
    pub async fn list_transactions_for_account(
        &self,
        family_id: Uuid,
        account_id: Uuid,
        limit: u64,
    ) -> ResultLedger<Vec<Transaction>> {
        self.require_account_in_family(&self.database, family_id, account_id)
            .await?;
        let models = transactions::Entity::find()
            .filter(transactions::Column::AccountId.eq(account_id.to_string()))
            .order_by_desc(transactions::Column::Date)
            .limit(limit)
            .all(&self.database)
            .await?;
        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Children of a split parent.
    pub async fn split_children(
        &self,
        family_id: Uuid,
        parent_id: Uuid,
    ) -> ResultLedger<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .filter(transactions::Column::FamilyId.eq(family_id.to_string()))
            .filter(transactions::Column::ParentId.eq(parent_id.to_string()))
            .all(&self.database)
            .await?;
        models.into_iter().map(Transaction::try_from).collect()
    }
}
