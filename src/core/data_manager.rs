use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::services::SummaryService;
use crate::core::time::Clock;
use crate::errors::{BudgetError, Result};
use crate::ledger::{
    amount_in_range, validation, BudgetLimits, BudgetStatus, BudgetSummary, ChartData, MonthKey,
    NewTransaction, Transaction, TransactionId, TransactionInput, ValidationReport,
};
use crate::storage::{load_json, save_json, KeyValueStore, BUDGET_LIMITS_KEY, TRANSACTIONS_KEY};

/// Owns the transaction collection, per-month budget limits, and the selected month.
///
/// Every mutation is applied in memory and then written through to storage before
/// the call returns.
pub struct DataManager<S: KeyValueStore, C: Clock> {
    storage: S,
    clock: C,
    transactions: Vec<Transaction>,
    limits: BudgetLimits,
    selected: MonthKey,
}

impl<S: KeyValueStore, C: Clock> DataManager<S, C> {
    /// Loads both persisted records and selects the clock's current month.
    pub fn open(storage: S, clock: C) -> Result<Self> {
        let mut transactions: Vec<Transaction> = load_json(&storage, TRANSACTIONS_KEY)?;
        let before = transactions.len();
        transactions
            .retain(|txn| amount_in_range(txn.amount) && !txn.description.trim().is_empty());
        if transactions.len() != before {
            warn!(
                dropped = before - transactions.len(),
                "ignored stored transactions with out-of-range amounts or empty descriptions"
            );
        }

        let mut limits: BudgetLimits = load_json(&storage, BUDGET_LIMITS_KEY)?;
        let dropped = limits.retain_in_range();
        if dropped > 0 {
            warn!(dropped, "ignored out-of-range stored budget limits");
        }

        let selected = MonthKey::from_date(clock.today());
        debug!(
            transactions = transactions.len(),
            limits = limits.len(),
            %selected,
            "data manager opened"
        );
        Ok(Self {
            storage,
            clock,
            transactions,
            limits,
            selected,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budget_limits(&self) -> &BudgetLimits {
        &self.limits
    }

    pub fn validate_transaction(&self, input: &TransactionInput) -> ValidationReport {
        validation::validate_transaction(input)
    }

    /// Stores a validated transaction under a freshly generated id.
    ///
    /// In-memory state only changes once the write has succeeded.
    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction> {
        let id = self.unique_id();
        let transaction = draft.into_transaction(id);
        let mut staged = self.transactions.clone();
        staged.push(transaction.clone());
        self.commit_transactions(staged)?;
        info!(id = %transaction.id, kind = %transaction.kind, amount = %transaction.amount, "transaction added");
        Ok(transaction)
    }

    /// Returns `false` without touching storage when `id` is unknown.
    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<bool> {
        let Some(index) = self.transactions.iter().position(|txn| &txn.id == id) else {
            debug!(%id, "delete requested for unknown transaction");
            return Ok(false);
        };
        let mut staged = self.transactions.clone();
        staged.remove(index);
        self.commit_transactions(staged)?;
        info!(%id, "transaction deleted");
        Ok(true)
    }

    pub fn transactions_for_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let key = MonthKey::new(year, month)?;
        Ok(self.transactions_in(key))
    }

    pub fn transactions_in(&self, month: MonthKey) -> Vec<Transaction> {
        SummaryService::filter_month(&self.transactions, month)
    }

    pub fn calculate_total_income(&self, transactions: &[Transaction]) -> Decimal {
        SummaryService::total_income(transactions)
    }

    pub fn calculate_total_expenses(&self, transactions: &[Transaction]) -> Decimal {
        SummaryService::total_expenses(transactions)
    }

    pub fn calculate_remaining_budget(&self, limit: Decimal, total_expenses: Decimal) -> Decimal {
        SummaryService::remaining_budget(limit, total_expenses)
    }

    pub fn budget_status(&self, limit: Decimal, total_expenses: Decimal) -> BudgetStatus {
        SummaryService::budget_status(limit, total_expenses)
    }

    /// Zero when no limit has been set for the month.
    pub fn budget_limit(&self, year: i32, month: u32) -> Result<Decimal> {
        Ok(self.limits.get(MonthKey::new(year, month)?))
    }

    pub fn set_budget_limit(&mut self, year: i32, month: u32, value: Decimal) -> Result<()> {
        let key = MonthKey::new(year, month)?;
        let mut staged = self.limits.clone();
        staged.set(key, value)?;
        self.commit_limits(staged)?;
        info!(month = %key, limit = %value, "budget limit set");
        Ok(())
    }

    /// Removes the limit for `month`, returning whether one was set.
    pub fn clear_budget_limit(&mut self, month: MonthKey) -> Result<bool> {
        let mut staged = self.limits.clone();
        if staged.clear(month).is_none() {
            return Ok(false);
        }
        self.commit_limits(staged)?;
        info!(%month, "budget limit cleared");
        Ok(true)
    }

    pub fn selected_month(&self) -> MonthKey {
        self.selected
    }

    pub fn set_selected_month(&mut self, year: i32, month: u32) -> Result<MonthKey> {
        self.selected = MonthKey::new(year, month)?;
        Ok(self.selected)
    }

    pub fn select_previous_month(&mut self) -> MonthKey {
        self.selected = self.selected.previous();
        self.selected
    }

    pub fn select_next_month(&mut self) -> MonthKey {
        self.selected = self.selected.next();
        self.selected
    }

    pub fn summary_for_month(&self, month: MonthKey) -> BudgetSummary {
        SummaryService::summarize(self.limits.get(month), &self.transactions_in(month))
    }

    pub fn chart_for_month(&self, month: MonthKey) -> ChartData {
        SummaryService::chart_data(&self.transactions_in(month))
    }

    fn unique_id(&self) -> TransactionId {
        loop {
            let candidate = TransactionId::generate(self.clock.now());
            if !self.transactions.iter().any(|txn| txn.id == candidate) {
                return candidate;
            }
        }
    }

    /// Writes `staged` and adopts it only if the write succeeds.
    fn commit_transactions(&mut self, staged: Vec<Transaction>) -> Result<()> {
        save_json(&mut self.storage, TRANSACTIONS_KEY, &staged)?;
        self.transactions = staged;
        Ok(())
    }

    fn commit_limits(&mut self, staged: BudgetLimits) -> Result<()> {
        save_json(&mut self.storage, BUDGET_LIMITS_KEY, &staged)?;
        self.limits = staged;
        Ok(())
    }
}

/// Parses user-entered budget limit text into a strictly positive amount.
pub fn parse_budget_limit(raw: &str) -> Result<Decimal> {
    validation::parse_positive_decimal(raw)
        .map_err(|_| BudgetError::InvalidBudgetLimit(raw.trim().to_string()))
}
