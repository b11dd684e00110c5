use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Payee, ResultLedger, payees, transactions,
    util::{normalize_optional_text, normalize_required_name},
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_payee(
        &self,
        family_id: Uuid,
        name: &str,
        notes: Option<&str>,
    ) -> ResultLedger<Payee> {
        let name = normalize_required_name(name, "payee")?;
        with_tx!(self, |db_tx| {
            self.require_family(&db_tx, family_id).await?;
            let payee = Payee {
                id: Uuid::new_v4(),
                family_id,
                name,
                notes: normalize_optional_text(notes),
            };
            payees::ActiveModel::from(&payee).insert(&db_tx).await?;
            Ok(payee)
        })
    }

    pub async fn payee(&self, family_id: Uuid, payee_id: Uuid) -> ResultLedger<Payee> {
        let model = self
            .require_payee_in_family(&self.database, family_id, payee_id)
            .await?;
        Payee::try_from(model)
    }

    pub async fn list_payees(&self, family_id: Uuid) -> ResultLedger<Vec<Payee>> {
        self.require_family(&self.database, family_id).await?;
        let models = payees::Entity::find()
            .filter(payees::Column::FamilyId.eq(family_id.to_string()))
            .order_by_asc(payees::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Payee::try_from).collect()
    }

    /// Deletes a payee; transactions keep their history but drop the
    /// reference (payees are descriptive only).
    pub async fn delete_payee(&self, family_id: Uuid, payee_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            self.require_payee_in_family(&db_tx, family_id, payee_id)
                .await?;
            transactions::Entity::update_many()
                .col_expr(
                    transactions::Column::PayeeId,
                    sea_orm::sea_query::Expr::value(sea_orm::Value::String(None)),
                )
                .filter(transactions::Column::PayeeId.eq(payee_id.to_string()))
                .exec(&db_tx)
                .await?;
            payees::Entity::delete_by_id(payee_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Updates a payee's name/notes in place.
    pub async fn rename_payee(
        &self,
        family_id: Uuid,
        payee_id: Uuid,
        name: &str,
        notes: Option<&str>,
    ) -> ResultLedger<Payee> {
        let name = normalize_required_name(name, "payee")?;
        with_tx!(self, |db_tx| {
            let model = self
                .require_payee_in_family(&db_tx, family_id, payee_id)
                .await?;
            let update = payees::ActiveModel {
                id: ActiveValue::Set(model.id.clone()),
                name: ActiveValue::Set(name),
                notes: ActiveValue::Set(normalize_optional_text(notes)),
                ..Default::default()
            };
            let updated = update.update(&db_tx).await?;
            Payee::try_from(updated)
        })
    }
}
