use ledger::{
    AccountKind, CreateAccountCmd, CreateCategoryCmd, CreateTransactionCmd, Money,
};

mod common;
use common::{date, engine_with_db, expense_category, month};

#[tokio::test]
async fn offbudget_account_is_excluded_from_the_balance() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    engine
        .create_account(
            CreateAccountCmd::new(family.id, "Checking", AccountKind::Checking, date(2026, 1, 1))
                .starting_balance(Money::new(50_000)),
        )
        .await
        .unwrap();
    engine
        .create_account(
            CreateAccountCmd::new(
                family.id,
                "Brokerage",
                AccountKind::Investment,
                date(2026, 1, 1),
            )
            .offbudget(true)
            .starting_balance(Money::new(9_000_000)),
        )
        .await
        .unwrap();

    let balance = engine
        .total_on_budget_balance(family.id, date(2026, 1, 31))
        .await
        .unwrap();
    assert_eq!(balance, Money::new(50_000));
}

#[tokio::test]
async fn uncategorized_transactions_count_toward_balance_but_not_activity() {
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

    // Payroll lands without a category; the balance tracks cash anyway.
    engine
        .create_transaction(CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 5),
            Money::new(200_000),
        ))
        .await
        .unwrap();

    let balance = engine
        .total_on_budget_balance(family.id, date(2026, 2, 28))
        .await
        .unwrap();
    assert_eq!(balance, Money::new(200_000));

    let activity = engine
        .total_expense_activity_before_month(family.id, month(2026, 3))
        .await
        .unwrap();
    assert_eq!(activity, Money::ZERO);
}

#[tokio::test]
async fn income_group_allocations_are_excluded_from_budgeted_sums() {
    let (engine, _db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();

    let income_group = engine
        .create_category_group(family.id, "Income", true, 0)
        .await
        .unwrap();
    let salary = engine
        .create_category(CreateCategoryCmd::new(family.id, income_group.id, "Salary"))
        .await
        .unwrap();

    let march = month(2026, 3);
    engine
        .set_category_budget(family.id, salary.id, march, Money::new(500_000))
        .await
        .unwrap();

    let budgeted = engine
        .total_expense_budgeted_for_month(family.id, march)
        .await
        .unwrap();
    assert_eq!(budgeted, Money::ZERO);
}

#[tokio::test]
async fn ready_to_assign_end_to_end() {
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

    // February: a deposit and a categorized expense.
    engine
        .create_transaction(CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 5),
            Money::new(200_000),
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

    // February envelope, then the March one.
    engine
        .set_category_budget(family.id, groceries, month(2026, 2), Money::new(100_000))
        .await
        .unwrap();
    engine
        .set_category_budget(family.id, groceries, month(2026, 3), Money::new(50_000))
        .await
        .unwrap();

    let summary = engine
        .ready_to_assign(family.id, month(2026, 3), date(2026, 3, 31))
        .await
        .unwrap();

    assert_eq!(summary.on_budget_balance, Money::new(120_000));
    assert_eq!(summary.budgeted_this_month, Money::new(50_000));
    assert_eq!(summary.prior_budgeted, Money::new(100_000));
    assert_eq!(summary.prior_activity, Money::new(-80_000));
    // 120000 - 50000 - (100000 - 80000)
    assert_eq!(summary.available, Money::new(50_000));
}

#[tokio::test]
async fn balance_respects_the_as_of_date() {
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

    engine
        .create_transaction(CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 2, 5),
            Money::new(100_000),
        ))
        .await
        .unwrap();
    engine
        .create_transaction(CreateTransactionCmd::new(
            family.id,
            checking.id,
            date(2026, 4, 5),
            Money::new(30_000),
        ))
        .await
        .unwrap();

    let as_of_march = engine
        .total_on_budget_balance(family.id, date(2026, 3, 31))
        .await
        .unwrap();
    assert_eq!(as_of_march, Money::new(100_000));

    let as_of_april = engine
        .total_on_budget_balance(family.id, date(2026, 4, 30))
        .await
        .unwrap();
    assert_eq!(as_of_april, Money::new(130_000));
}

#[tokio::test]
async fn setting_the_same_month_twice_coalesces() {
    let (engine, db) = engine_with_db().await;
    let family = engine.create_family("Doe").await.unwrap();
    let (_, groceries) = expense_category(&engine, family.id, "Groceries").await;
    let march = month(2026, 3);

    let first = engine
        .set_category_budget(family.id, groceries, march, Money::new(10_000))
        .await
        .unwrap();
    let second = engine
        .set_category_budget(family.id, groceries, march, Money::new(25_000))
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.budgeted, Money::new(25_000));

    use sea_orm::{ConnectionTrait, Statement};
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS cnt FROM allocations WHERE category_id = ?",
            vec![groceries.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    let count: i64 = row.try_get("", "cnt").unwrap();
    assert_eq!(count, 1);
}
