#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_pulse::{
    core::FixedClock,
    ledger::{NewTransaction, TransactionKind},
    storage::JsonStorage,
    DataManager,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub type TestManager = DataManager<JsonStorage, FixedClock>;

/// Unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Manager over a fresh JSON store with "today" pinned to 2025-01-15.
pub fn setup_test_env() -> (TestManager, PathBuf) {
    let dir = temp_dir().join("data");
    (open_at(&dir), dir)
}

pub fn open_at(dir: &PathBuf) -> TestManager {
    let storage = JsonStorage::new(dir.clone()).expect("create json storage backend");
    DataManager::open(storage, FixedClock::at_date(date(2025, 1, 15))).expect("open data manager")
}

pub fn draft(
    on: NaiveDate,
    kind: TransactionKind,
    description: &str,
    amount: Decimal,
) -> NewTransaction {
    NewTransaction::new(on, kind, description, amount).expect("valid draft")
}

/// Salary and rent in January, groceries in February.
pub fn seed_scenario(manager: &mut TestManager) {
    use rust_decimal_macros::dec;
    manager
        .add_transaction(draft(date(2025, 1, 5), TransactionKind::Income, "Salary", dec!(1000)))
        .expect("add salary");
    manager
        .add_transaction(draft(date(2025, 1, 10), TransactionKind::Expense, "Rent", dec!(300)))
        .expect("add rent");
    manager
        .add_transaction(draft(date(2025, 2, 1), TransactionKind::Expense, "Groceries", dec!(50)))
        .expect("add groceries");
}
