//! Display currency for listing prices.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CurrencyError;
use crate::persist::{Persisted, Readiness, Slot};
use crate::store::{Store, Subscription};

/// Allowed ISO 4217 codes. `USD` is the base currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
    Inr,
    Aed,
}

impl Currency {
    pub const ALL: [Currency; 10] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Cad,
        Currency::Aud,
        Currency::Chf,
        Currency::Cny,
        Currency::Inr,
        Currency::Aed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
            Currency::Aed => "AED",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy | Currency::Cny => "¥",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Chf => "CHF ",
            Currency::Inr => "₹",
            Currency::Aed => "AED ",
        }
    }

    /// Minor units shown when formatting.
    pub fn decimals(self) -> usize {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Render `amount` with the currency symbol and thousands separators,
    /// e.g. `$1,250,000.00`.
    pub fn format_amount(self, amount: f64) -> String {
        let formatted = format!("{:.*}", self.decimals(), amount.abs());
        let (whole, fraction) = match formatted.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if amount < 0.0 { "-" } else { "" };
        match fraction {
            Some(fraction) => format!("{sign}{}{grouped}.{fraction}", self.symbol()),
            None => format!("{sign}{}{grouped}", self.symbol()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| CurrencyError::Unsupported(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyState {
    pub currency: Currency,
}

#[derive(Clone)]
pub struct CurrencyStore {
    store: Store<CurrencyState>,
    slot: Slot,
    readiness: Readiness,
}

impl CurrencyStore {
    pub fn new(slot: Slot) -> Self {
        Self {
            store: Store::new(CurrencyState::default()),
            slot,
            readiness: Readiness::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.store.read(|state| state.currency)
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&CurrencyState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn set_currency(&self, currency: Currency) {
        self.store.update(|state| state.currency = currency);
        // Saved under the read lock so queued writes follow commit order
        self.store
            .read(|state| self.slot.save_raw(state.currency.code()));
    }

    /// Select a currency by ISO code. Unsupported codes leave state untouched.
    pub fn set_currency_code(&self, code: &str) -> Result<(), CurrencyError> {
        let currency = code.parse()?;
        self.set_currency(currency);
        Ok(())
    }

    pub fn format_price(&self, amount: f64) -> String {
        self.currency().format_amount(amount)
    }
}

#[async_trait]
impl Persisted for CurrencyStore {
    async fn hydrate(&self) {
        if let Some(raw) = self.slot.load_raw().await {
            match raw.parse::<Currency>() {
                Ok(currency) => {
                    tracing::debug!(currency = %currency, "Rehydrated currency");
                    self.store.update(|state| state.currency = currency);
                }
                Err(e) => tracing::warn!(key = %self.slot.key(), error = %e, "Ignoring persisted currency"),
            }
        }
        self.readiness.mark_ready();
    }

    fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}
