//! Trip expenses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ExpenseValidationError;

/// Currency applied when an expense does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Caller-supplied expense identifier, unique within its trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Validate and construct an [`ExpenseId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, ExpenseValidationError> {
        let trimmed = id.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ExpenseId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExpenseId {
    type Error = ExpenseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExpenseId> for String {
    fn from(value: ExpenseId) -> Self {
        value.0
    }
}

/// ISO 4217-style three letter currency code, upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Currency(String);

impl Currency {
    /// Validate and normalise a currency code.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ExpenseValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ExpenseValidationError::InvalidCurrency {
                value: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_owned())
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

/// Raw expense fields before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub id: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// A validated expense.
///
/// ## Invariants
/// - `amount` is finite and non-negative.
/// - `currency` defaults to [`DEFAULT_CURRENCY`].
/// - `date` defaults to the instant the expense was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    id: ExpenseId,
    category: String,
    amount: f64,
    currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    date: DateTime<Utc>,
}

impl Expense {
    /// Validate a draft, filling the date with `recorded_at` when absent.
    pub fn new(
        draft: ExpenseDraft,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, ExpenseValidationError> {
        let ExpenseDraft {
            id,
            category,
            amount,
            currency,
            notes,
            date,
        } = draft;

        let id = ExpenseId::new(id)?;
        let category = category.trim();
        if category.is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(ExpenseValidationError::InvalidAmount { value: amount });
        }
        let currency = currency.map(Currency::new).transpose()?.unwrap_or_default();

        Ok(Self {
            id,
            category: category.to_owned(),
            amount,
            currency,
            notes,
            date: date.unwrap_or(recorded_at),
        })
    }

    pub fn id(&self) -> &ExpenseId {
        &self.id
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
