//! Payees are purely descriptive references on transactions.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub name: String,
    pub notes: Option<String>,
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
}

impl Related<super::families::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Families.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payee> for ActiveModel {
    fn from(payee: &Payee) -> Self {
        Self {
            id: ActiveValue::Set(payee.id.to_string()),
            family_id: ActiveValue::Set(payee.family_id.to_string()),
            name: ActiveValue::Set(payee.name.clone()),
            notes: ActiveValue::Set(payee.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Payee {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "payee")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            name: model.name,
            notes: model.notes,
        })
    }
}
