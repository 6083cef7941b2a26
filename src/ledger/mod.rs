//! Transaction and budget domain types plus input validation.

pub mod budget;
pub mod month;
pub mod transaction;
pub mod validation;

pub use budget::{BudgetLimits, BudgetStatus, BudgetSummary, ChartData};
pub use month::MonthKey;
pub use transaction::{
    amount_in_range, NewTransaction, Transaction, TransactionId, TransactionKind, MAX_AMOUNT,
};
pub use validation::{
    parse_transaction, validate_transaction, Field, FieldError, TransactionInput,
    ValidationReport,
};
