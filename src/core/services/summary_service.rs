//! Budget aggregation helpers over transaction slices.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::ledger::{
    BudgetStatus, BudgetSummary, ChartData, MonthKey, Transaction, TransactionKind,
};

/// Stateless aggregation utilities shared by the data manager and renderers.
pub struct SummaryService;

impl SummaryService {
    pub fn filter_month<'a, I>(transactions: I, month: MonthKey) -> Vec<Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .filter(|txn| month.contains(txn.date))
            .cloned()
            .collect()
    }

    pub fn total_income(transactions: &[Transaction]) -> Decimal {
        Self::total_of_kind(transactions, TransactionKind::Income)
    }

    pub fn total_expenses(transactions: &[Transaction]) -> Decimal {
        Self::total_of_kind(transactions, TransactionKind::Expense)
    }

    /// Saturates at `Decimal::MAX` rather than panicking on records that bypassed validation.
    fn total_of_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
        transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .fold(Decimal::ZERO, |total, txn| total.saturating_add(txn.amount))
    }

    /// `limit - total_expenses`; negative once the month is overspent.
    pub fn remaining_budget(limit: Decimal, total_expenses: Decimal) -> Decimal {
        limit.saturating_sub(total_expenses)
    }

    /// Spending exactly the limit is still within budget.
    pub fn budget_status(limit: Decimal, total_expenses: Decimal) -> BudgetStatus {
        if total_expenses > limit {
            BudgetStatus::Over
        } else {
            BudgetStatus::Within
        }
    }

    pub fn summarize(limit: Decimal, transactions: &[Transaction]) -> BudgetSummary {
        let total_income = Self::total_income(transactions);
        let total_expenses = Self::total_expenses(transactions);
        BudgetSummary {
            budget_limit: limit,
            total_income,
            total_expenses,
            remaining_budget: Self::remaining_budget(limit, total_expenses),
            status: Self::budget_status(limit, total_expenses),
        }
    }

    pub fn chart_data(transactions: &[Transaction]) -> ChartData {
        let income = Self::total_income(transactions);
        let expenses = Self::total_expenses(transactions);
        ChartData {
            income,
            expenses,
            savings: income.saturating_sub(expenses),
        }
    }

    /// Newest first; same-day entries fall back to id order so output is stable.
    pub fn sorted_for_display(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.sort_by(|a, b| match b.date.cmp(&a.date) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });
        transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{TransactionId, MAX_AMOUNT};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(id: &str, date: (i32, u32, u32), kind: TransactionKind, amount: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            kind,
            description: format!("entry {id}"),
            amount,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("a", (2025, 1, 5), TransactionKind::Income, dec!(1000)),
            txn("b", (2025, 1, 10), TransactionKind::Expense, dec!(300)),
            txn("c", (2025, 2, 1), TransactionKind::Expense, dec!(50)),
        ]
    }

    #[test]
    fn totals_split_by_kind() {
        let all = sample();
        assert_eq!(SummaryService::total_income(&all), dec!(1000));
        assert_eq!(SummaryService::total_expenses(&all), dec!(350));
        let sum: Decimal = all.iter().map(|t| t.amount).sum();
        assert_eq!(
            SummaryService::total_income(&all) + SummaryService::total_expenses(&all),
            sum
        );
    }

    #[test]
    fn empty_list_totals_zero() {
        assert_eq!(SummaryService::total_income(&[]), Decimal::ZERO);
        assert_eq!(SummaryService::total_expenses(&[]), Decimal::ZERO);
    }

    #[test]
    fn remaining_budget_may_go_negative() {
        assert_eq!(SummaryService::remaining_budget(dec!(250), dec!(300)), dec!(-50));
        assert_eq!(SummaryService::remaining_budget(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn status_boundary_is_within() {
        assert_eq!(
            SummaryService::budget_status(dec!(300), dec!(300)),
            BudgetStatus::Within
        );
        assert_eq!(
            SummaryService::budget_status(dec!(300), dec!(300.01)),
            BudgetStatus::Over
        );
        assert_eq!(
            SummaryService::budget_status(dec!(0), dec!(0)),
            BudgetStatus::Within
        );
    }

    #[test]
    fn filter_month_keeps_only_that_month() {
        let all = sample();
        let jan = SummaryService::filter_month(&all, MonthKey::new(2025, 1).unwrap());
        let ids: Vec<&str> = jan.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn summarize_january_scenario() {
        let jan = SummaryService::filter_month(&sample(), MonthKey::new(2025, 1).unwrap());
        let summary = SummaryService::summarize(dec!(800), &jan);
        assert_eq!(summary.total_income, dec!(1000));
        assert_eq!(summary.total_expenses, dec!(300));
        assert_eq!(summary.remaining_budget, dec!(500));
        assert_eq!(summary.status, BudgetStatus::Within);

        let tight = SummaryService::summarize(dec!(250), &jan);
        assert_eq!(tight.status, BudgetStatus::Over);
        assert_eq!(tight.remaining_budget, dec!(-50));
    }

    #[test]
    fn chart_savings_is_income_minus_expenses() {
        let chart = SummaryService::chart_data(&sample());
        assert_eq!(chart.savings, dec!(650));
    }

    #[test]
    fn totals_of_capped_amounts_are_exact() {
        let many: Vec<Transaction> = (0..1000)
            .map(|idx| txn(&idx.to_string(), (2025, 1, 1), TransactionKind::Expense, MAX_AMOUNT))
            .collect();
        assert_eq!(
            SummaryService::total_expenses(&many),
            MAX_AMOUNT * Decimal::from(1000)
        );
    }

    #[test]
    fn oversized_amounts_saturate_instead_of_panicking() {
        let huge = vec![
            txn("a", (2025, 1, 1), TransactionKind::Expense, Decimal::MAX),
            txn("b", (2025, 1, 2), TransactionKind::Expense, Decimal::MAX),
            txn("c", (2025, 1, 3), TransactionKind::Income, Decimal::MAX),
        ];
        assert_eq!(SummaryService::total_expenses(&huge), Decimal::MAX);
        let summary = SummaryService::summarize(dec!(10), &huge);
        assert_eq!(summary.status, BudgetStatus::Over);
        assert_eq!(summary.remaining_budget, dec!(10) - Decimal::MAX);
        let chart = SummaryService::chart_data(&huge);
        assert_eq!(chart.savings, Decimal::ZERO);
    }

    #[test]
    fn display_order_is_newest_first() {
        let mut all = sample();
        all.push(txn("0", (2025, 1, 10), TransactionKind::Income, dec!(5)));
        let sorted = SummaryService::sorted_for_display(all);
        let ids: Vec<&str> = sorted.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "0", "b", "a"]);
    }
}
