use sea_orm::DatabaseConnection;

use crate::{Currency, ResultLedger};

mod access;
mod accounts;
mod allocations;
mod budget;
mod categories;
mod families;
mod payees;
mod transactions;
mod transfers;

pub use budget::ReadyToAssign;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Explicit configuration threaded into the engine at construction time.
///
/// There are no implicit process-environment reads inside the engine; the
/// family currency and any future knobs arrive through this value.
#[derive(Clone, Debug, Default)]
pub struct LedgerConfig {
    pub currency: Currency,
}

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    config: LedgerConfig,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    config: LedgerConfig,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn config(mut self, config: LedgerConfig) -> EngineBuilder {
        self.config = config;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultLedger<Engine> {
        Ok(Engine {
            database: self.database,
            config: self.config,
        })
    }
}
