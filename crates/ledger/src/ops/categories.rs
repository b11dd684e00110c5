use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Category, CategoryGroup, CreateCategoryCmd, LedgerError, ResultLedger, allocations,
    categories, category_groups, transactions, util::normalize_required_name,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_category_group(
        &self,
        family_id: Uuid,
        name: &str,
        is_income: bool,
        sort_order: i32,
    ) -> ResultLedger<CategoryGroup> {
        let name = normalize_required_name(name, "category group")?;
        with_tx!(self, |db_tx| {
            self.require_family(&db_tx, family_id).await?;

            let clash = category_groups::Entity::find()
                .filter(category_groups::Column::FamilyId.eq(family_id.to_string()))
                .filter(category_groups::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if clash.is_some() {
                return Err(LedgerError::ExistingKey(name));
            }

            let group = CategoryGroup {
                id: Uuid::new_v4(),
                family_id,
                name,
                sort_order,
                is_income,
                hidden: false,
            };
            category_groups::ActiveModel::from(&group)
                .insert(&db_tx)
                .await?;
            Ok(group)
        })
    }

    pub async fn create_category(&self, cmd: CreateCategoryCmd) -> ResultLedger<Category> {
        let name = normalize_required_name(&cmd.name, "category")?;
        with_tx!(self, |db_tx| {
            self.require_group_in_family(&db_tx, cmd.family_id, cmd.group_id)
                .await?;

            let clash = categories::Entity::find()
                .filter(categories::Column::GroupId.eq(cmd.group_id.to_string()))
                .filter(categories::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if clash.is_some() {
                return Err(LedgerError::ExistingKey(name));
            }

            let category = Category {
                id: Uuid::new_v4(),
                family_id: cmd.family_id,
                group_id: cmd.group_id,
                name,
                sort_order: cmd.sort_order,
                hidden: false,
                rollover_enabled: cmd.rollover_enabled,
                goal_amount: cmd.goal_amount,
            };
            categories::ActiveModel::from(&category)
                .insert(&db_tx)
                .await?;
            Ok(category)
        })
    }

    pub async fn category(&self, family_id: Uuid, category_id: Uuid) -> ResultLedger<Category> {
        let model = self
            .require_category_in_family(&self.database, family_id, category_id)
            .await?;
        Category::try_from(model)
    }

    pub async fn list_category_groups(&self, family_id: Uuid) -> ResultLedger<Vec<CategoryGroup>> {
        self.require_family(&self.database, family_id).await?;
        let models = category_groups::Entity::find()
            .filter(category_groups::Column::FamilyId.eq(family_id.to_string()))
            .order_by_asc(category_groups::Column::SortOrder)
            .order_by_asc(category_groups::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(CategoryGroup::try_from).collect()
    }

    pub async fn list_categories(&self, family_id: Uuid, group_id: Uuid) -> ResultLedger<Vec<Category>> {
        self.require_group_in_family(&self.database, family_id, group_id)
            .await?;
        let models = categories::Entity::find()
            .filter(categories::Column::GroupId.eq(group_id.to_string()))
            .order_by_asc(categories::Column::SortOrder)
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Category::try_from).collect()
    }

    /// Deletes a category together with the transactions and allocations it
    /// owns.
    pub async fn delete_category(&self, family_id: Uuid, category_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_category_in_family(&db_tx, family_id, category_id)
                .await?;
            self.delete_category_owned(&db_tx, category_id).await?;
            Ok(())
        })
    }

    /// Deletes a group, cascading through its categories.
    pub async fn delete_category_group(&self, family_id: Uuid, group_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_group_in_family(&db_tx, family_id, group_id)
                .await?;

            let members = categories::Entity::find()
                .filter(categories::Column::GroupId.eq(group_id.to_string()))
                .all(&db_tx)
                .await?;
            for member in members {
                let category_id = crate::util::parse_uuid(&member.id, "category")?;
                self.delete_category_owned(&db_tx, category_id).await?;
            }

            category_groups::Entity::delete_by_id(group_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    async fn delete_category_owned(
        &self,
        db_tx: &sea_orm::DatabaseTransaction,
        category_id: Uuid,
    ) -> ResultLedger<()> {
        transactions::Entity::delete_many()
            .filter(transactions::Column::CategoryId.eq(category_id.to_string()))
            .exec(db_tx)
            .await?;
        allocations::Entity::delete_many()
            .filter(allocations::Column::CategoryId.eq(category_id.to_string()))
            .exec(db_tx)
            .await?;
        categories::Entity::delete_by_id(category_id.to_string())
            .exec(db_tx)
            .await?;
        Ok(())
    }
}
