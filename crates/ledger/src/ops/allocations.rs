use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Allocation, BudgetMonth, LedgerError, Money, ResultLedger, allocations};

use super::{Engine, with_tx};

impl Engine {
    /// Sets the budgeted amount for a (category, month) pair.
    ///
    /// The allocation is created on the first budgeting action and mutated
    /// in place afterwards; the pair is never duplicated.
    pub async fn set_category_budget(
        &self,
        family_id: Uuid,
        category_id: Uuid,
        month: BudgetMonth,
        amount: Money,
    ) -> ResultLedger<Allocation> {
        with_tx!(self, |db_tx| {
            self.require_category_in_family(&db_tx, family_id, category_id)
                .await?;

            let existing = self
                .find_allocation(&db_tx, family_id, category_id, month)
                .await?;
            match existing {
                Some(model) => {
                    let update = allocations::ActiveModel {
                        id: ActiveValue::Set(model.id.clone()),
                        budgeted_minor: ActiveValue::Set(amount.cents()),
                        ..Default::default()
                    };
                    let updated = update.update(&db_tx).await?;
                    Allocation::try_from(updated)
                }
                None => {
                    let mut allocation = Allocation::new(family_id, category_id, month);
                    allocation.budgeted = amount;
                    allocations::ActiveModel::from(&allocation)
                        .insert(&db_tx)
                        .await?;
                    Ok(allocation)
                }
            }
        })
    }

    pub async fn allocation(
        &self,
        family_id: Uuid,
        category_id: Uuid,
        month: BudgetMonth,
    ) -> ResultLedger<Allocation> {
        let model = self
            .find_allocation(&self.database, family_id, category_id, month)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("allocation {category_id} {month}"))
            })?;
        Allocation::try_from(model)
    }
}
