//! Transaction primitives.
//!
//! A `Transaction` is a signed balance change on one account: negative
//! amounts are outflows, positive amounts are inflows. Inter-account
//! transfers exist as two paired rows, each holding the other account's id
//! in `transfer_account_id`; the partner is resolved by lookup, never held
//! as an object reference. Split transactions are a parent row
//! (`is_parent`) whose amount equals the sum of its children
//! (`parent_id`).

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, Money, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub family_id: Uuid,
    pub account_id: Uuid,
    pub date: NaiveDate,
    pub amount: Money,
    pub payee_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub notes: Option<String>,
    pub cleared: bool,
    pub reconciled: bool,
    pub imported_id: Option<String>,
    pub parent_id: Option<Uuid>,
    pub is_parent: bool,
    pub transfer_account_id: Option<Uuid>,
}

impl Transaction {
    /// A plain ledger row; transfer and split fields start unset.
    pub fn new(
        family_id: Uuid,
        account_id: Uuid,
        date: NaiveDate,
        amount: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            family_id,
            account_id,
            date,
            amount,
            payee_id: None,
            category_id: None,
            notes: None,
            cleared: false,
            reconciled: false,
            imported_id: None,
            parent_id: None,
            is_parent: false,
            transfer_account_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub account_id: String,
    pub date: Date,
    pub amount_minor: i64,
    pub payee_id: Option<String>,
    pub category_id: Option<String>,
    pub notes: Option<String>,
    pub cleared: bool,
    pub reconciled: bool,
    pub imported_id: Option<String>,
    pub parent_id: Option<String>,
    pub is_parent: bool,
    pub transfer_account_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            family_id: ActiveValue::Set(tx.family_id.to_string()),
            account_id: ActiveValue::Set(tx.account_id.to_string()),
            date: ActiveValue::Set(tx.date),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            payee_id: ActiveValue::Set(tx.payee_id.map(|id| id.to_string())),
            category_id: ActiveValue::Set(tx.category_id.map(|id| id.to_string())),
            notes: ActiveValue::Set(tx.notes.clone()),
            cleared: ActiveValue::Set(tx.cleared),
            reconciled: ActiveValue::Set(tx.reconciled),
            imported_id: ActiveValue::Set(tx.imported_id.clone()),
            parent_id: ActiveValue::Set(tx.parent_id.map(|id| id.to_string())),
            is_parent: ActiveValue::Set(tx.is_parent),
            transfer_account_id: ActiveValue::Set(tx.transfer_account_id.map(|id| id.to_string())),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let parse_opt = |value: Option<&String>, label: &str| -> Result<Option<Uuid>, LedgerError> {
            value.map(|v| parse_uuid(v, label)).transpose()
        };
        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            account_id: parse_uuid(&model.account_id, "account")?,
            date: model.date,
            amount: Money::new(model.amount_minor),
            payee_id: parse_opt(model.payee_id.as_ref(), "payee")?,
            category_id: parse_opt(model.category_id.as_ref(), "category")?,
            notes: model.notes,
            cleared: model.cleared,
            reconciled: model.reconciled,
            imported_id: model.imported_id,
            parent_id: parse_opt(model.parent_id.as_ref(), "transaction")?,
            is_parent: model.is_parent,
            transfer_account_id: parse_opt(model.transfer_account_id.as_ref(), "account")?,
        })
    }
}
