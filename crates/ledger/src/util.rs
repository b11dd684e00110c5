//! Internal helpers for parsing and validation.
//!
//! These utilities are **not** part of the public API, except for
//! [`parse_date`] which callers use to turn untrusted text into a typed
//! date before invoking engine operations.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{LedgerError, ResultLedger};

/// Parses a `YYYY-MM-DD` date, rejecting malformed input with a
/// [`LedgerError::Validation`].
pub fn parse_date(s: &str) -> ResultLedger<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Validation(format!("invalid date: {s}")))
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultLedger<Uuid> {
    Uuid::parse_str(value).map_err(|_| LedgerError::Validation(format!("invalid {label} id")))
}

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultLedger<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2026-02-28").is_ok());
        assert!(parse_date("2026-02-30").is_err());
        assert!(parse_date("tomorrow").is_err());
    }

    #[test]
    fn normalize_trims_and_rejects_empty() {
        assert_eq!(normalize_required_name("  Rent ", "category").unwrap(), "Rent");
        assert!(normalize_required_name("   ", "category").is_err());
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" hi ")), Some("hi".to_string()));
    }
}
