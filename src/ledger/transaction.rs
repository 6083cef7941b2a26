use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BudgetError;

/// Largest amount accepted for a transaction or a budget limit (one trillion).
/// Month totals stay far below the point where `Decimal` arithmetic overflows.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Whether `amount` is strictly positive and no larger than [`MAX_AMOUNT`].
pub fn amount_in_range(amount: Decimal) -> bool {
    amount > Decimal::ZERO && amount <= MAX_AMOUNT
}

/// Opaque transaction identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Builds an id from the creation timestamp and a random suffix.
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!(
            "{:x}-{}",
            now.timestamp_millis(),
            Uuid::new_v4().simple()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = BudgetError;

    /// Accepts exactly `income` or `expense`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(BudgetError::InvalidInput(format!(
                "`{other}` is not a transaction type"
            ))),
        }
    }
}

/// A dated income or expense record. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// A validated transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    date: NaiveDate,
    kind: TransactionKind,
    description: String,
    amount: Decimal,
}

impl NewTransaction {
    /// Checks the stored-transaction invariants: trimmed description is
    /// non-empty and the amount is strictly positive.
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, BudgetError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(BudgetError::InvalidInput("description is required".into()));
        }
        if !amount_in_range(amount) {
            return Err(BudgetError::InvalidInput(format!(
                "amount must be positive and at most {MAX_AMOUNT}, got {amount}"
            )));
        }
        Ok(Self {
            date,
            kind,
            description,
            amount,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            kind: self.kind,
            description: self.description,
            amount: self.amount,
        }
    }
}
