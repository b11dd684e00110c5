use ledger::{AccountKind, CreateAccountCmd, LedgerError, Money};
use sea_orm::{ConnectionTrait, Statement};

mod common;
use common::{date, engine_with_db};

#[tokio::test]
async fn starting_balance_materializes_exactly_one_transaction() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let account = engine
        .create_account(
            CreateAccountCmd::new(family.id, "Checking", AccountKind::Checking, date(2026, 1, 15))
                .starting_balance(Money::new(500_000)),
        )
        .await
        .unwrap();

    let txs = engine
        .list_transactions_for_account(family.id, account.id, 50)
        .await
        .unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].amount, Money::new(500_000));
    assert_eq!(txs[0].date, date(2026, 1, 15));
    assert!(txs[0].cleared);
    assert_eq!(txs[0].category_id, None);
    assert_eq!(txs[0].payee_id, None);

    let balance = engine
        .total_on_budget_balance(family.id, date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(balance, Money::new(500_000));
}

#[tokio::test]
async fn zero_starting_balance_creates_no_transaction() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let account = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 15),
        ))
        .await
        .unwrap();

    let txs = engine
        .list_transactions_for_account(family.id, account.id, 50)
        .await
        .unwrap();
    assert!(txs.is_empty());
}

#[tokio::test]
async fn same_name_creates_a_second_account() {
    let (engine, db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    for _ in 0..2 {
        engine
            .create_account(CreateAccountCmd::new(
                family.id,
                "Checking",
                AccountKind::Checking,
                date(2026, 1, 15),
            ))
            .await
            .unwrap();
    }

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS cnt FROM accounts WHERE family_id = ?",
            vec![family.id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let count: i64 = row.try_get("", "cnt").unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn cross_family_lookup_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let doe = engine.create_family("Doe").await.unwrap();
    let roe = engine.create_family("Roe").await.unwrap();

    let account = engine
        .create_account(CreateAccountCmd::new(
            doe.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 15),
        ))
        .await
        .unwrap();

    let err = engine.account(roe.id, account.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn closed_account_drops_out_of_the_balance() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let account = engine
        .create_account(
            CreateAccountCmd::new(family.id, "Old savings", AccountKind::Savings, date(2026, 1, 1))
                .starting_balance(Money::new(120_000)),
        )
        .await
        .unwrap();

    let before = engine
        .total_on_budget_balance(family.id, date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(before, Money::new(120_000));

    let closed = engine.close_account(family.id, account.id).await.unwrap();
    assert!(closed.closed);

    let after = engine
        .total_on_budget_balance(family.id, date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(after, Money::ZERO);
}

#[tokio::test]
async fn delete_family_cascades_to_everything_it_owns() {
    let (engine, db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    engine
        .create_account(
            CreateAccountCmd::new(family.id, "Checking", AccountKind::Checking, date(2026, 1, 1))
                .starting_balance(Money::new(10_000)),
        )
        .await
        .unwrap();

    engine.delete_family(family.id).await.unwrap();

    let err = engine.family(family.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let backend = db.get_database_backend();
    for table in ["accounts", "transactions"] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                backend,
                format!("SELECT COUNT(*) AS cnt FROM {table} WHERE family_id = ?"),
                vec![family.id.to_string().into()],
            ))
            .await
            .unwrap()
            .unwrap();
        let count: i64 = row.try_get("", "cnt").unwrap();
        assert_eq!(count, 0);
    }
}

#[tokio::test]
async fn delete_account_removes_its_transactions() {
    let (engine, db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let account = engine
        .create_account(
            CreateAccountCmd::new(family.id, "Checking", AccountKind::Checking, date(2026, 1, 1))
                .starting_balance(Money::new(10_000)),
        )
        .await
        .unwrap();

    engine.delete_account(family.id, account.id).await.unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS cnt FROM transactions WHERE account_id = ?",
            vec![account.id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let count: i64 = row.try_get("", "cnt").unwrap();
    assert_eq!(count, 0);
}
