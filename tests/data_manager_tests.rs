mod common;

use budget_pulse::{
    core::parse_budget_limit,
    ledger::{BudgetStatus, Field, MonthKey, Transaction, TransactionId, TransactionInput, TransactionKind},
    storage::{KeyValueStore, BUDGET_LIMITS_KEY, TRANSACTIONS_KEY},
    BudgetError,
};
use common::{date, draft, open_at, seed_scenario, setup_test_env};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn january_scenario_within_budget() {
    let (mut manager, _) = setup_test_env();
    seed_scenario(&mut manager);
    manager.set_budget_limit(2025, 1, dec!(800)).unwrap();

    let january = manager.transactions_for_month(2025, 1).unwrap();
    let descriptions: Vec<&str> = january.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["Salary", "Rent"]);

    let income = manager.calculate_total_income(&january);
    let expenses = manager.calculate_total_expenses(&january);
    let limit = manager.budget_limit(2025, 1).unwrap();
    assert_eq!(income, dec!(1000));
    assert_eq!(expenses, dec!(300));
    assert_eq!(manager.calculate_remaining_budget(limit, expenses), dec!(500));
    assert_eq!(manager.budget_status(limit, expenses), BudgetStatus::Within);
}

#[test]
fn january_scenario_over_budget() {
    let (mut manager, _) = setup_test_env();
    seed_scenario(&mut manager);
    manager.set_budget_limit(2025, 1, dec!(250)).unwrap();

    let summary = manager.summary_for_month(MonthKey::new(2025, 1).unwrap());
    assert_eq!(summary.status, BudgetStatus::Over);
    assert_eq!(summary.remaining_budget, dec!(-50));
}

#[test]
fn totals_partition_all_amounts() {
    let (mut manager, _) = setup_test_env();
    seed_scenario(&mut manager);
    let all: Vec<Transaction> = manager.transactions().to_vec();
    let sum: Decimal = all.iter().map(|t| t.amount).sum();
    assert_eq!(
        manager.calculate_total_income(&all) + manager.calculate_total_expenses(&all),
        sum
    );
}

#[test]
fn status_boundary_is_inclusive() {
    let (manager, _) = setup_test_env();
    assert_eq!(manager.budget_status(dec!(300), dec!(300)), BudgetStatus::Within);
    assert_eq!(manager.budget_status(dec!(300), dec!(300.01)), BudgetStatus::Over);
}

#[test]
fn unset_limit_counts_as_zero() {
    let (mut manager, _) = setup_test_env();
    seed_scenario(&mut manager);
    assert_eq!(manager.budget_limit(2025, 2).unwrap(), Decimal::ZERO);
    let summary = manager.summary_for_month(MonthKey::new(2025, 2).unwrap());
    assert_eq!(summary.status, BudgetStatus::Over);
    assert_eq!(summary.remaining_budget, dec!(-50));

    let empty = manager.summary_for_month(MonthKey::new(2025, 3).unwrap());
    assert_eq!(empty.status, BudgetStatus::Within);
    assert_eq!(empty.remaining_budget, Decimal::ZERO);
}

#[test]
fn added_transaction_is_found_by_its_month() {
    let (mut manager, _) = setup_test_env();
    let stored = manager
        .add_transaction(draft(date(2025, 3, 3), TransactionKind::Expense, "Coffee", dec!(4.5)))
        .unwrap();

    let march = manager.transactions_for_month(2025, 3).unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].id, stored.id);
    assert!(!stored.id.as_str().is_empty());
}

#[test]
fn generated_ids_are_unique() {
    let (mut manager, _) = setup_test_env();
    for idx in 0..25 {
        manager
            .add_transaction(draft(date(2025, 1, 1), TransactionKind::Income, "Tip", Decimal::from(idx + 1)))
            .unwrap();
    }
    let mut ids: Vec<&str> = manager.transactions().iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 25);
}

#[test]
fn delete_removes_exactly_one() {
    let (mut manager, _) = setup_test_env();
    seed_scenario(&mut manager);
    let target = manager.transactions()[1].id.clone();

    assert!(manager.delete_transaction(&target).unwrap());
    assert_eq!(manager.transactions().len(), 2);
    assert!(manager.transactions().iter().all(|t| t.id != target));

    assert!(!manager.delete_transaction(&TransactionId::from("missing")).unwrap());
    assert_eq!(manager.transactions().len(), 2);
}

#[test]
fn mutations_survive_reopen() {
    let (mut manager, dir) = setup_test_env();
    seed_scenario(&mut manager);
    manager.set_budget_limit(2025, 1, dec!(800)).unwrap();
    let before = manager.transactions().to_vec();
    drop(manager);

    let reopened = open_at(&dir);
    assert_eq!(reopened.transactions(), before.as_slice());
    assert_eq!(reopened.budget_limit(2025, 1).unwrap(), dec!(800));
    assert!(dir.join("transactions.json").exists());
    assert!(dir.join("budget_limits.json").exists());
}

#[test]
fn persisted_records_use_expected_shape() {
    let (mut manager, _) = setup_test_env();
    manager
        .add_transaction(draft(date(2025, 1, 5), TransactionKind::Income, "Salary", dec!(1000)))
        .unwrap();
    manager.set_budget_limit(2025, 1, dec!(800)).unwrap();

    let raw = manager.storage().get(TRANSACTIONS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["type"], "income");
    assert_eq!(json[0]["date"], "2025-01-05");
    assert_eq!(json[0]["description"], "Salary");

    let raw = manager.storage().get(BUDGET_LIMITS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(json.get("2025-01").is_some());
}

#[test]
fn corrupt_record_is_a_storage_error() {
    let (_, dir) = setup_test_env();
    std::fs::write(dir.join("transactions.json"), "{ not json").unwrap();
    let storage = budget_pulse::storage::JsonStorage::new(dir.clone()).unwrap();
    let result = budget_pulse::DataManager::open(
        storage,
        budget_pulse::core::FixedClock::at_date(date(2025, 1, 15)),
    );
    assert!(matches!(result, Err(BudgetError::StorageError(_))));
}

#[test]
fn invalid_limits_are_rejected() {
    let (mut manager, _) = setup_test_env();
    assert!(matches!(
        manager.set_budget_limit(2025, 1, Decimal::ZERO),
        Err(BudgetError::InvalidBudgetLimit(_))
    ));
    assert!(matches!(
        manager.set_budget_limit(2025, 13, dec!(10)),
        Err(BudgetError::InvalidMonth { month: 13 })
    ));
    assert!(parse_budget_limit("abc").is_err());
    assert!(parse_budget_limit("-1").is_err());
    assert_eq!(parse_budget_limit(" 800 ").unwrap(), dec!(800));
}

#[test]
fn validation_reports_each_bad_field() {
    let (manager, _) = setup_test_env();
    let report = manager.validate_transaction(&TransactionInput::new("", "income", "", "-5"));
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 3);
    assert!(report.has_error(Field::Date));
    assert!(report.has_error(Field::Description));
    assert!(report.has_error(Field::Amount));
    assert!(!report.has_error(Field::Type));
}

#[test]
fn month_navigation_wraps_years() {
    let (mut manager, _) = setup_test_env();
    assert_eq!(manager.selected_month(), MonthKey::new(2025, 1).unwrap());
    assert_eq!(manager.select_previous_month(), MonthKey::new(2024, 12).unwrap());
    assert_eq!(manager.select_next_month(), MonthKey::new(2025, 1).unwrap());
    assert!(manager.set_selected_month(2025, 0).is_err());
}
