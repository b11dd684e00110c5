//! Spending categories (envelopes).
//!
//! A category owns its transactions' category links and its allocations;
//! deleting a category deletes both. The `rollover_enabled` flag is
//! persisted but does not currently alter carry-forward math.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, Money, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub family_id: Uuid,
    pub group_id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub hidden: bool,
    pub rollover_enabled: bool,
    pub goal_amount: Option<Money>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub group_id: String,
    pub name: String,
    pub sort_order: i32,
    pub hidden: bool,
    pub rollover_enabled: bool,
    pub goal_amount_minor: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category_groups::Entity",
        from = "Column::GroupId",
        to = "super::category_groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    CategoryGroups,
    #[sea_orm(has_many = "super::allocations::Entity")]
    Allocations,
}

impl Related<super::category_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryGroups.def()
    }
}

impl Related<super::allocations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            family_id: ActiveValue::Set(category.family_id.to_string()),
            group_id: ActiveValue::Set(category.group_id.to_string()),
            name: ActiveValue::Set(category.name.clone()),
            sort_order: ActiveValue::Set(category.sort_order),
            hidden: ActiveValue::Set(category.hidden),
            rollover_enabled: ActiveValue::Set(category.rollover_enabled),
            goal_amount_minor: ActiveValue::Set(category.goal_amount.map(Money::cents)),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "category")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            group_id: parse_uuid(&model.group_id, "category group")?,
            name: model.name,
            sort_order: model.sort_order,
            hidden: model.hidden,
            rollover_enabled: model.rollover_enabled,
            goal_amount: model.goal_amount_minor.map(Money::new),
        })
    }
}
