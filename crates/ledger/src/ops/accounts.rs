use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Account, CreateAccountCmd, ResultLedger, Transaction, accounts, transactions,
    util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates an account; a non-zero starting balance is materialized as
    /// exactly one opening transaction in the same atomic unit.
    ///
    /// Account names are deliberately not deduplicated at this layer:
    /// creating a second account with the same name produces a second
    /// account, not a merge.
    pub async fn create_account(&self, cmd: CreateAccountCmd) -> ResultLedger<Account> {
        let name = normalize_required_name(&cmd.name, "account")?;
        with_tx!(self, |db_tx| {
            self.require_family(&db_tx, cmd.family_id).await?;

            let account = Account {
                id: Uuid::new_v4(),
                family_id: cmd.family_id,
                name,
                kind: cmd.kind,
                offbudget: cmd.offbudget,
                closed: false,
                starting_balance: cmd.starting_balance,
                sort_order: cmd.sort_order,
            };
            accounts::ActiveModel::from(&account).insert(&db_tx).await?;

            if !cmd.starting_balance.is_zero() {
                let mut opening = Transaction::new(
                    cmd.family_id,
                    account.id,
                    cmd.opened_on,
                    cmd.starting_balance,
                );
                opening.cleared = true;
                opening.notes = Some("Starting balance".to_string());
                transactions::ActiveModel::from(&opening)
                    .insert(&db_tx)
                    .await?;
            }

            tracing::debug!(account = %account.id, "created account {}", account.name);
            Ok(account)
        })
    }

    pub async fn account(&self, family_id: Uuid, account_id: Uuid) -> ResultLedger<Account> {
        let model = self
            .require_account_in_family(&self.database, family_id, account_id)
            .await?;
        Account::try_from(model)
    }

    pub async fn list_accounts(&self, family_id: Uuid) -> ResultLedger<Vec<Account>> {
        self.require_family(&self.database, family_id).await?;
        let models = accounts::Entity::find()
            .filter(accounts::Column::FamilyId.eq(family_id.to_string()))
            .order_by_asc(accounts::Column::SortOrder)
            .order_by_asc(accounts::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Account::try_from).collect()
    }

    /// Marks an account closed. Closed accounts keep their transactions but
    /// drop out of the on-budget balance.
    pub async fn close_account(&self, family_id: Uuid, account_id: Uuid) -> ResultLedger<Account> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_account_in_family(&db_tx, family_id, account_id)
                .await?;
            let update = accounts::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                closed: ActiveValue::Set(true),
                ..Default::default()
            };
            let updated = update.update(&db_tx).await?;
            Account::try_from(updated)
        })
    }

    /// Deletes an account together with its transactions.
    pub async fn delete_account(&self, family_id: Uuid, account_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_account_in_family(&db_tx, family_id, account_id)
                .await?;
            transactions::Entity::delete_many()
                .filter(transactions::Column::AccountId.eq(account_id.to_string()))
                .exec(&db_tx)
                .await?;
            accounts::Entity::delete_by_id(account_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
