use ledger::{
    AccountKind, CreateAccountCmd, CreateSplitCmd, CreateTransactionCmd, LedgerError, Money,
    SplitLine,
};

mod common;
use common::{date, engine_with_db, expense_category, month};

#[tokio::test]
async fn imported_id_deduplicates_reimports() {
    let (engine, db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    let cmd = || {
        CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 5),
            Money::new(-4_200),
        )
        .imported_id("bank-stmt-00017")
    };

    let first = engine.create_transaction(cmd()).await.unwrap();
    let second = engine.create_transaction(cmd()).await.unwrap();
    assert_eq!(first.id, second.id);

    use sea_orm::{ConnectionTrait, Statement};
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS cnt FROM transactions WHERE account_id = ?",
            vec![checking.id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let count: i64 = row.try_get("", "cnt").unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn zero_amount_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    let err = engine
        .create_transaction(CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 5),
            Money::ZERO,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn split_parent_carries_the_sum_of_its_children() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();
    let (_, groceries) = expense_category(&engine, family.id, "Groceries").await;
    let (_, household) = expense_category(&engine, family.id, "Household").await;

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    let parent = engine
        .create_split_transaction(CreateSplitCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 10),
            vec![
                SplitLine::new(Money::new(-30_000)).category_id(groceries),
                SplitLine::new(Money::new(-20_000)).category_id(household),
            ],
        ))
        .await
        .unwrap();

    assert!(parent.is_parent);
    assert_eq!(parent.amount, Money::new(-50_000));

    let children = engine.split_children(family.id, parent.id).await.unwrap();
    assert_eq!(children.len(), 2);
    let child_total = children
        .iter()
        .fold(Money::ZERO, |acc, child| acc + child.amount);
    assert_eq!(child_total, parent.amount);

    // The balance counts the parent only; the activity sums the children.
    let balance = engine
        .total_on_budget_balance(family.id, date(2026, 2, 28))
        .await
        .unwrap();
    assert_eq!(balance, Money::new(-50_000));

    let activity = engine
        .total_expense_activity_before_month(family.id, month(2026, 3))
        .await
        .unwrap();
    assert_eq!(activity, Money::new(-50_000));
}

#[tokio::test]
async fn split_with_a_single_line_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    let err = engine
        .create_split_transaction(CreateSplitCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 10),
            vec![SplitLine::new(Money::new(-30_000))],
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[tokio::test]
async fn deleting_a_category_deletes_its_transactions_and_allocations() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();
    let (_, groceries) = expense_category(&engine, family.id, "Groceries").await;

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();

    engine
        .create_transaction(
            CreateTransactionCmd::new(
                family.id,
                checking.id,
                date(2026, 2, 20),
                Money::new(-80_000),
            )
            .category_id(groceries),
        )
        .await
        .unwrap();
    engine
        .set_category_budget(family.id, groceries, month(2026, 2), Money::new(100_000))
        .await
        .unwrap();

    engine.delete_category(family.id, groceries).await.unwrap();

    let err = engine.category(family.id, groceries).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    // The category's expense is gone from the ledger.
    let balance = engine
        .total_on_budget_balance(family.id, date(2026, 2, 28))
        .await
        .unwrap();
    assert_eq!(balance, Money::ZERO);

    let err = engine
        .allocation(family.id, groceries, month(2026, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_payee_clears_the_reference_but_keeps_history() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let checking = engine
        .create_account(CreateAccountCmd::new(
            family.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();
    let grocer = engine
        .create_payee(family.id, "Corner Grocer", None)
        .await
        .unwrap();

    let tx = engine
        .create_transaction(
            CreateTransactionCmd::new(
                family.id,
                checking.id,
                date(2026, 2, 5),
                Money::new(-3_000),
            )
            .payee_id(grocer.id),
        )
        .await
        .unwrap();

    engine.delete_payee(family.id, grocer.id).await.unwrap();

    let err = engine.payee(family.id, grocer.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));

    let kept = engine.transaction(family.id, tx.id).await.unwrap();
    assert_eq!(kept.payee_id, None);
    assert_eq!(kept.amount, Money::new(-3_000));
}

#[tokio::test]
async fn transactions_in_another_family_are_invisible() {
    let (engine, _db) = engine_with_db().await;
    let doe = engine.create_family("Doe").await.unwrap();
    let roe = engine.create_family("Roe").await.unwrap();

    let checking = engine
        .create_account(CreateAccountCmd::new(
            doe.id,
            "Checking",
            AccountKind::Checking,
            date(2026, 1, 1),
        ))
        .await
        .unwrap();
    let tx = engine
        .create_transaction(CreateTransactionCmd::new(
            doe.id,
            checking.id,
            date(2026, 2, 5),
            Money::new(10_000),
        ))
        .await
        .unwrap();

    let err = engine.transaction(roe.id, tx.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}
