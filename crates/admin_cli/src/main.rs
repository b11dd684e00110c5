//! Bootstrap and inspection utilities for a Hearth ledger database.

use std::error::Error;

use clap::{Args, Parser, Subcommand};
use ledger::{
    AccountKind, BudgetMonth, CoverOverspendingCmd, CreateAccountCmd, CreateCategoryCmd,
    CreateTransactionCmd, Currency, Engine, LedgerConfig, Money, TransferAccountsCmd,
    TransferCategoriesCmd, parse_date,
};
use migration::MigratorTrait;
use sea_orm::Database;
use uuid::Uuid;

mod settings;

#[derive(Parser, Debug)]
#[command(name = "hearth_admin")]
#[command(about = "Admin utilities for Hearth (bootstrap families/accounts/budgets)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a family (tenant).
    FamilyCreate(FamilyCreateArgs),
    /// Create an account, optionally with a starting balance.
    AccountCreate(AccountCreateArgs),
    /// List a family's accounts.
    AccountList(FamilyArg),
    /// Create a category group.
    GroupCreate(GroupCreateArgs),
    /// Create a category inside a group.
    CategoryCreate(CategoryCreateArgs),
    /// Set the budgeted amount for a category and month.
    BudgetSet(BudgetSetArgs),
    /// Record a transaction.
    TransactionAdd(TransactionAddArgs),
    /// Move money between two accounts.
    TransferAccounts(TransferAccountsArgs),
    /// Move budgeted money between two categories.
    TransferCategories(TransferCategoriesArgs),
    /// Cover an overspent category from another category.
    CoverOverspending(CoverOverspendingArgs),
    /// Show the ready-to-assign breakdown for a month.
    ReadyToAssign(ReadyToAssignArgs),
}

#[derive(Args, Debug)]
struct FamilyArg {
    #[arg(long)]
    family: Uuid,
}

#[derive(Args, Debug)]
struct FamilyCreateArgs {
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct AccountCreateArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "checking")]
    kind: String,
    #[arg(long)]
    offbudget: bool,
    /// Starting balance in major units, e.g. "5000.00".
    #[arg(long, default_value = "0")]
    starting_balance: String,
    /// Opening date, `YYYY-MM-DD`.
    #[arg(long)]
    opened_on: String,
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long)]
    is_income: bool,
    #[arg(long, default_value_t = 0)]
    sort_order: i32,
}

#[derive(Args, Debug)]
struct CategoryCreateArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    group: Uuid,
    #[arg(long)]
    name: String,
    #[arg(long)]
    rollover: bool,
}

#[derive(Args, Debug)]
struct BudgetSetArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    category: Uuid,
    /// Budget month, `YYYY-MM`.
    #[arg(long)]
    month: String,
    #[arg(long)]
    amount: String,
}

#[derive(Args, Debug)]
struct TransactionAddArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    account: Uuid,
    #[arg(long)]
    date: String,
    /// Signed amount in major units; negative for outflows.
    #[arg(long)]
    amount: String,
    #[arg(long)]
    category: Option<Uuid>,
    #[arg(long)]
    payee: Option<Uuid>,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct TransferAccountsArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    from: Uuid,
    #[arg(long)]
    to: Uuid,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    date: String,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct TransferCategoriesArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    from: Uuid,
    #[arg(long)]
    to: Uuid,
    #[arg(long)]
    amount: String,
    #[arg(long)]
    month: String,
    #[arg(long)]
    notes: Option<String>,
}

#[derive(Args, Debug)]
struct CoverOverspendingArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    overspent: Uuid,
    #[arg(long)]
    source: Uuid,
    #[arg(long)]
    month: String,
}

#[derive(Args, Debug)]
struct ReadyToAssignArgs {
    #[arg(long)]
    family: Uuid,
    #[arg(long)]
    month: String,
    /// Reference date for the balance term; defaults to the last entry date
    /// callers care about, `YYYY-MM-DD`.
    #[arg(long)]
    as_of: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new()?;

    let level = settings.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(format!("hearth_admin={level},ledger={level}"))
        .init();

    let database_url = cli
        .database_url
        .or(settings.database_url)
        .unwrap_or_else(|| "sqlite:./hearth.db?mode=rwc".to_string());

    let currency = match settings.currency.as_deref() {
        Some(raw) => Currency::try_from(raw)?,
        None => Currency::default(),
    };

    let db = Database::connect(&database_url).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("database ready at {database_url}");

    let engine = Engine::builder()
        .database(db)
        .config(LedgerConfig { currency })
        .build()
        .await?;

    match cli.command {
        Command::FamilyCreate(args) => {
            let family = engine.create_family(&args.name).await?;
            println!("{} {}", family.id, family.name);
        }
        Command::AccountCreate(args) => {
            let kind = AccountKind::try_from(args.kind.as_str())?;
            let opened_on = parse_date(&args.opened_on)?;
            let starting_balance: Money = args.starting_balance.parse()?;
            let account = engine
                .create_account(
                    CreateAccountCmd::new(args.family, args.name, kind, opened_on)
                        .offbudget(args.offbudget)
                        .starting_balance(starting_balance),
                )
                .await?;
            println!("{} {}", account.id, account.name);
        }
        Command::AccountList(args) => {
            for account in engine.list_accounts(args.family).await? {
                println!(
                    "{} {:12} {:10} offbudget={} closed={}",
                    account.id,
                    account.name,
                    account.kind.as_str(),
                    account.offbudget,
                    account.closed,
                );
            }
        }
        Command::GroupCreate(args) => {
            let group = engine
                .create_category_group(args.family, &args.name, args.is_income, args.sort_order)
                .await?;
            println!("{} {}", group.id, group.name);
        }
        Command::CategoryCreate(args) => {
            let category = engine
                .create_category(
                    CreateCategoryCmd::new(args.family, args.group, args.name)
                        .rollover_enabled(args.rollover),
                )
                .await?;
            println!("{} {}", category.id, category.name);
        }
        Command::BudgetSet(args) => {
            let month = BudgetMonth::parse(&args.month)?;
            let amount: Money = args.amount.parse()?;
            let allocation = engine
                .set_category_budget(args.family, args.category, month, amount)
                .await?;
            println!(
                "{} {} budgeted {}",
                allocation.id,
                allocation.month,
                allocation.budgeted.format(currency)
            );
        }
        Command::TransactionAdd(args) => {
            let date = parse_date(&args.date)?;
            let amount: Money = args.amount.parse()?;
            let mut cmd = CreateTransactionCmd::new(args.family, args.account, date, amount);
            if let Some(category) = args.category {
                cmd = cmd.category_id(category);
            }
            if let Some(payee) = args.payee {
                cmd = cmd.payee_id(payee);
            }
            if let Some(notes) = args.notes {
                cmd = cmd.notes(notes);
            }
            let tx = engine.create_transaction(cmd).await?;
            println!("{} {} {}", tx.id, tx.date, tx.amount.format(currency));
        }
        Command::TransferAccounts(args) => {
            let date = parse_date(&args.date)?;
            let amount: Money = args.amount.parse()?;
            let mut cmd =
                TransferAccountsCmd::new(args.family, args.from, args.to, amount, date);
            if let Some(notes) = args.notes {
                cmd = cmd.notes(notes);
            }
            let (withdrawal, deposit) = engine.transfer_between_accounts(cmd).await?;
            println!("{} -> {}", withdrawal.id, deposit.id);
        }
        Command::TransferCategories(args) => {
            let month = BudgetMonth::parse(&args.month)?;
            let amount: Money = args.amount.parse()?;
            let mut cmd =
                TransferCategoriesCmd::new(args.family, args.from, args.to, amount, month);
            if let Some(notes) = args.notes {
                cmd = cmd.notes(notes);
            }
            let (from, to) = engine.transfer_between_categories(cmd).await?;
            println!(
                "from {} now {}; to {} now {}",
                from.category_id,
                from.budgeted.format(currency),
                to.category_id,
                to.budgeted.format(currency)
            );
        }
        Command::CoverOverspending(args) => {
            let month = BudgetMonth::parse(&args.month)?;
            let (from, to) = engine
                .cover_overspending(CoverOverspendingCmd::new(
                    args.family,
                    args.overspent,
                    args.source,
                    month,
                ))
                .await?;
            println!(
                "source {} now {}; covered {} now {}",
                from.category_id,
                from.budgeted.format(currency),
                to.category_id,
                to.budgeted.format(currency)
            );
        }
        Command::ReadyToAssign(args) => {
            let month = BudgetMonth::parse(&args.month)?;
            let as_of = parse_date(&args.as_of)?;
            let summary = engine.ready_to_assign(args.family, month, as_of).await?;
            println!("on-budget balance   {}", summary.on_budget_balance.format(currency));
            println!("budgeted this month {}", summary.budgeted_this_month.format(currency));
            println!("prior budgeted      {}", summary.prior_budgeted.format(currency));
            println!("prior activity      {}", summary.prior_activity.format(currency));
            println!("ready to assign     {}", summary.available.format(currency));
        }
    }

    Ok(())
}
