//! The family is the tenant boundary of the ledger.
//!
//! Every other entity carries a `family_id` and every query is filtered by
//! it; deleting a family cascades to everything it owns.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub currency: Currency,
}

impl Family {
    pub fn new(name: String, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            currency,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "families")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub currency: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::accounts::Entity")]
    Accounts,
    #[sea_orm(has_many = "super::category_groups::Entity")]
    CategoryGroups,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::category_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Family> for ActiveModel {
    fn from(family: &Family) -> Self {
        Self {
            id: ActiveValue::Set(family.id.to_string()),
            name: ActiveValue::Set(family.name.clone()),
            currency: ActiveValue::Set(family.currency.code().to_string()),
        }
    }
}

impl TryFrom<Model> for Family {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "family")?,
            name: model.name,
            currency: Currency::try_from(model.currency.as_str()).unwrap_or_default(),
        })
    }
}
