//! Monthly budget allocations.
//!
//! One row per (category, month); the month column always holds the first
//! day of the month (see [`BudgetMonth`](crate::BudgetMonth)). A second
//! write for the same pair coalesces into the existing row, it never
//! duplicates it.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{BudgetMonth, LedgerError, Money, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub id: Uuid,
    pub family_id: Uuid,
    pub category_id: Uuid,
    pub month: BudgetMonth,
    pub budgeted: Money,
    pub notes: Option<String>,
}

impl Allocation {
    /// Zero-initialized allocation, as lazily created by budgeting actions.
    pub fn new(family_id: Uuid, category_id: Uuid, month: BudgetMonth) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            category_id,
            month,
            budgeted: Money::ZERO,
            notes: None,
        }
    }
}

/// The updated state of one side of a category transfer, as returned to the
/// caller (id, category, new budgeted amount).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationState {
    pub id: Uuid,
    pub category_id: Uuid,
    pub budgeted: Money,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub category_id: String,
    pub month: Date,
    pub budgeted_minor: i64,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Allocation> for ActiveModel {
    fn from(allocation: &Allocation) -> Self {
        Self {
            id: ActiveValue::Set(allocation.id.to_string()),
            family_id: ActiveValue::Set(allocation.family_id.to_string()),
            category_id: ActiveValue::Set(allocation.category_id.to_string()),
            month: ActiveValue::Set(allocation.month.first_day()),
            budgeted_minor: ActiveValue::Set(allocation.budgeted.cents()),
            notes: ActiveValue::Set(allocation.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Allocation {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "allocation")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            category_id: parse_uuid(&model.category_id, "category")?,
            month: BudgetMonth::from_date(model.month),
            budgeted: Money::new(model.budgeted_minor),
            notes: model.notes,
        })
    }
}
