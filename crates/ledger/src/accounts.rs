//! Accounts hold transactions.
//!
//! Off-budget accounts (long-term investments, loans) still record
//! transactions but are excluded from every budgeting aggregate. The
//! `starting_balance` field is materialized exactly once, as an opening
//! transaction created together with the account (see
//! [`Engine::create_account`](crate::Engine::create_account)).

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, Money, util::parse_uuid};

/// Closed set of account types, persisted as a stable string encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    #[default]
    Checking,
    Savings,
    Credit,
    Investment,
    Loan,
    Other,
}

impl AccountKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Investment => "investment",
            Self::Loan => "loan",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for AccountKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            "investment" => Ok(Self::Investment),
            "loan" => Ok(Self::Loan),
            "other" => Ok(Self::Other),
            other => Err(LedgerError::Validation(format!(
                "invalid account kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub family_id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub offbudget: bool,
    pub closed: bool,
    pub starting_balance: Money,
    pub sort_order: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub family_id: String,
    pub name: String,
    pub kind: String,
    pub offbudget: bool,
    pub closed: bool,
    pub starting_balance_minor: i64,
    pub sort_order: i32,
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
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::families::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Families.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(account: &Account) -> Self {
        Self {
            id: ActiveValue::Set(account.id.to_string()),
            family_id: ActiveValue::Set(account.family_id.to_string()),
            name: ActiveValue::Set(account.name.clone()),
            kind: ActiveValue::Set(account.kind.as_str().to_string()),
            offbudget: ActiveValue::Set(account.offbudget),
            closed: ActiveValue::Set(account.closed),
            starting_balance_minor: ActiveValue::Set(account.starting_balance.cents()),
            sort_order: ActiveValue::Set(account.sort_order),
        }
    }
}

impl TryFrom<Model> for Account {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "account")?,
            family_id: parse_uuid(&model.family_id, "family")?,
            name: model.name,
            kind: AccountKind::try_from(model.kind.as_str())?,
            offbudget: model.offbudget,
            closed: model.closed,
            starting_balance: Money::new(model.starting_balance_minor),
            sort_order: model.sort_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_encoding_round_trips() {
        for kind in [
            AccountKind::Checking,
            AccountKind::Savings,
            AccountKind::Credit,
            AccountKind::Investment,
            AccountKind::Loan,
            AccountKind::Other,
        ] {
            assert_eq!(AccountKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(AccountKind::try_from("wallet").is_err());
    }
}
