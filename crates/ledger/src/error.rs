//! Errors surfaced by the ledger engine.
//!
//! Domain errors ([`NotFound`], [`Validation`], [`InsufficientFunds`],
//! [`ExistingKey`]) are final: they are never retried and never leave the
//! store in a partially applied state. [`Database`] wraps storage failures
//! (connectivity, timeouts, serialization conflicts) and is the only
//! retryable variant.
//!
//! [`NotFound`]: LedgerError::NotFound
//! [`Validation`]: LedgerError::Validation
//! [`InsufficientFunds`]: LedgerError::InsufficientFunds
//! [`ExistingKey`]: LedgerError::ExistingKey
//! [`Database`]: LedgerError::Database

use sea_orm::DbErr;
use thiserror::Error;

use crate::Money;

/// Ledger engine errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The referenced entity does not exist or belongs to another family.
    /// Cross-family lookups intentionally fail with this variant instead of
    /// an authorization error, so callers cannot probe for existence.
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("insufficient funds in \"{category}\": requested {requested}, available {available}")]
    InsufficientFunds {
        category: String,
        requested: Money,
        available: Money,
    },
    #[error("\"{0}\" already exists")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (
                Self::InsufficientFunds {
                    category: ac,
                    requested: ar,
                    available: av,
                },
                Self::InsufficientFunds {
                    category: bc,
                    requested: br,
                    available: bv,
                },
            ) => ac == bc && ar == br && av == bv,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
