//! Field-level validation for raw transaction form input.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::transaction::{NewTransaction, TransactionKind, MAX_AMOUNT};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, unparsed form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionInput {
    pub date: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
}

impl TransactionInput {
    pub fn new(
        date: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            kind: kind.into(),
            description: description.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Type,
    Description,
    Amount,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Type => "type",
            Field::Description => "description",
            Field::Amount => "amount",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn has_error(&self, field: Field) -> bool {
        self.errors.iter().any(|err| err.field == field)
    }
}

/// Checks every field and reports all violations together.
pub fn validate_transaction(input: &TransactionInput) -> ValidationReport {
    let errors: Vec<FieldError> = [
        parse_date(&input.date).err(),
        parse_kind(&input.kind).err(),
        parse_description(&input.description).err(),
        parse_amount(&input.amount).err(),
    ]
    .into_iter()
    .flatten()
    .collect();

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validates the input and, when every field passes, produces a [`NewTransaction`].
pub fn parse_transaction(input: &TransactionInput) -> Result<NewTransaction, ValidationReport> {
    let report = validate_transaction(input);
    if !report.is_valid {
        return Err(report);
    }
    let parsed = (
        parse_date(&input.date),
        parse_kind(&input.kind),
        parse_description(&input.description),
        parse_amount(&input.amount),
    );
    match parsed {
        (Ok(date), Ok(kind), Ok(description), Ok(amount)) => {
            NewTransaction::new(date, kind, description, amount).map_err(|err| ValidationReport {
                is_valid: false,
                errors: vec![FieldError {
                    field: Field::Amount,
                    message: err.to_string(),
                }],
            })
        }
        _ => Err(report),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::new(Field::Date, "Date is required"));
    }
    if !is_padded_iso_date(raw) {
        return Err(FieldError::new(Field::Date, "Please enter a valid date"));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| FieldError::new(Field::Date, "Please enter a valid date"))
}

/// `YYYY-MM-DD` with every component zero-padded.
fn is_padded_iso_date(raw: &str) -> bool {
    raw.len() == 10
        && raw.bytes().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn parse_kind(raw: &str) -> Result<TransactionKind, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(Field::Type, "Type is required"));
    }
    TransactionKind::from_str(raw)
        .map_err(|_| FieldError::new(Field::Type, "Type must be income or expense"))
}

fn parse_description(raw: &str) -> Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(Field::Description, "Description is required"));
    }
    Ok(trimmed.to_string())
}

/// Parses a positive decimal amount. Shared with budget-limit input.
pub(crate) fn parse_positive_decimal(raw: &str) -> Result<Decimal, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("is required");
    }
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| "must be a number")?;
    if value <= Decimal::ZERO {
        return Err("must be greater than 0");
    }
    if value > MAX_AMOUNT {
        return Err("must not exceed 1,000,000,000,000");
    }
    Ok(value)
}

fn parse_amount(raw: &str) -> Result<Decimal, FieldError> {
    parse_positive_decimal(raw).map_err(|reason| FieldError {
        field: Field::Amount,
        message: format!("Amount {reason}"),
    })
}
