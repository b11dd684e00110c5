//! Category groups partition categories into income and expense.
//!
//! Only categories in non-income groups participate in budgeting math; the
//! ready-to-assign aggregates filter on `is_income` at query time.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub sort_order: i32,
    pub is_income: bool,
    pub hidden: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "category_groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub name: String,
    pub sort_order: i32,
    pub is_income: bool,
    pub hidden: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::families::Entity",
        from = "Column::FamilyId",
        to = "super::families::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Families,
    #[sea_orm(has_many = "super::categories::Entity")]
    Categories,
}

impl Related<super::families::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Families.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CategoryGroup> for ActiveModel {
    fn from(group: &CategoryGroup) -> Self {
        Self {
            id: ActiveValue::Set(group.id.to_string()),
            family_id: ActiveValue::Set(group.family_id.to_string()),
            name: ActiveValue::Set(group.name.clone()),
            sort_order: ActiveValue::Set(group.sort_order),
            is_income: ActiveValue::Set(group.is_income),
            hidden: ActiveValue::Set(group.hidden),
        }
    }
}

impl TryFrom<Model> for CategoryGroup {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "category group")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            name: model.name,
            sort_order: model.sort_order,
            is_income: model.is_income,
            hidden: model.hidden,
        })
    }
}
