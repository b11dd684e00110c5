use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{
    LedgerError, ResultLedger, accounts, allocations, categories, category_groups, families,
    payees,
};

use super::Engine;

/// Generates a `require_*_in_family` lookup for a target entity.
///
/// Every lookup is filtered by family id; a row that exists under another
/// family is indistinguishable from a missing row (NotFound), so existence
/// never leaks across tenants.
macro_rules! impl_require_in_family {
    ($require_fn:ident, $module:ident, $label:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            family_id: Uuid,
            target_id: Uuid,
        ) -> ResultLedger<$module::Model> {
            $module::Entity::find_by_id(target_id.to_string())
                .filter($module::Column::FamilyId.eq(family_id.to_string()))
                .one(db)
                .await?
                .ok_or_else(|| LedgerError::NotFound(format!("{} {target_id}", $label)))
        }
    };
}

impl Engine {
    impl_require_in_family!(require_account_in_family, accounts, "account");
    impl_require_in_family!(require_group_in_family, category_groups, "category group");
    impl_require_in_family!(require_category_in_family, categories, "category");
    impl_require_in_family!(require_payee_in_family, payees, "payee");

    pub(super) async fn require_family<C: ConnectionTrait>(
        &self,
        db: &C,
        family_id: Uuid,
    ) -> ResultLedger<families::Model> {
        families::Entity::find_by_id(family_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| LedgerError::NotFound(format!("family {family_id}")))
    }

    /// Loads the allocation for a (category, month) pair, if one exists.
    pub(super) async fn find_allocation<C: ConnectionTrait>(
        &self,
        db: &C,
        family_id: Uuid,
        category_id: Uuid,
        month: crate::BudgetMonth,
    ) -> ResultLedger<Option<allocations::Model>> {
        allocations::Entity::find()
            .filter(allocations::Column::FamilyId.eq(family_id.to_string()))
            .filter(allocations::Column::CategoryId.eq(category_id.to_string()))
            .filter(allocations::Column::Month.eq(month.first_day()))
            .one(db)
            .await
            .map_err(Into::into)
    }
}
