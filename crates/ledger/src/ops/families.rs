use sea_orm::{QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Family, ResultLedger, accounts, allocations, categories, category_groups, families, payees,
    transactions, util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    /// Creates a family (tenant). The family currency comes from the engine
    /// configuration.
    pub async fn create_family(&self, name: &str) -> ResultLedger<Family> {
        let name = normalize_required_name(name, "family")?;
        let family = Family::new(name, self.config.currency);
        families::ActiveModel::from(&family)
            .insert(&self.database)
            .await?;
        tracing::debug!(family = %family.id, "created family {}", family.name);
        Ok(family)
    }

    pub async fn family(&self, family_id: Uuid) -> ResultLedger<Family> {
        let model = self.require_family(&self.database, family_id).await?;
        Family::try_from(model)
    }

    /// Deletes a family and everything it owns.
    pub async fn delete_family(&self, family_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_family(&db_tx, family_id).await?;
            let family_key = family_id.to_string();

            allocations::Entity::delete_many()
                .filter(allocations::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_many()
                .filter(transactions::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            payees::Entity::delete_many()
                .filter(payees::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            categories::Entity::delete_many()
                .filter(categories::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            category_groups::Entity::delete_many()
                .filter(category_groups::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            accounts::Entity::delete_many()
                .filter(accounts::Column::FamilyId.eq(family_key.clone()))
                .exec(&db_tx)
                .await?;
            families::Entity::delete_by_id(family_key)
                .exec(&db_tx)
                .await?;

            Ok(())
        })
    }
}
