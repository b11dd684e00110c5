#![allow(dead_code)]

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use ledger::{
    BudgetMonth, CreateCategoryCmd, Currency, Engine, LedgerConfig,
};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .config(LedgerConfig {
            currency: Currency::Usd,
        })
        .build()
        .await
        .unwrap();
    (engine, db)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn month(year: i32, month: u32) -> BudgetMonth {
    BudgetMonth::new(year, month).unwrap()
}

/// One expense group with one category, the smallest budgetable setup.
pub async fn expense_category(engine: &Engine, family_id: Uuid, name: &str) -> (Uuid, Uuid) {
    let group = engine
        .create_category_group(family_id, &format!("{name} group"), false, 0)
        .await
        .unwrap();
    let category = engine
        .create_category(CreateCategoryCmd::new(family_id, group.id, name))
        .await
        .unwrap();
    (group.id, category.id)
}
