use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// ISO-like currency code attached to a family and its money values.
///
/// A family is effectively mono-currency (default `USD`), but the currency is
/// modelled explicitly and threaded through [`LedgerConfig`] at construction
/// time rather than read from the process environment.
///
/// ## Minor units
///
/// The ledger stores monetary values as an `i64` number of **minor units**
/// (see [`Money`]). `minor_units()` returns how many decimal digits are used
/// when converting between major units (human input/output, e.g. `10.50 USD`)
/// and minor units (stored integers, e.g. `1050`).
///
/// [`LedgerConfig`]: crate::LedgerConfig
/// [`Money`]: crate::Money
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Usd | Currency::Eur => 2,
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(LedgerError::Validation(format!(
                "unsupported currency: {other}"
            ))),
        }
    }
}
