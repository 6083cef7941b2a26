//! Orchestrates user actions: validate, mutate through the data manager, then re-render.

use rust_decimal::Decimal;
use tracing::{error, warn};

use crate::core::data_manager::{parse_budget_limit, DataManager};
use crate::core::services::SummaryService;
use crate::core::time::Clock;
use crate::errors::Result;
use crate::ledger::{
    parse_transaction, BudgetSummary, ChartData, FieldError, MonthKey, Transaction, TransactionId,
    TransactionInput,
};
use crate::storage::KeyValueStore;

/// Short status messages shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TransactionAdded(Transaction),
    TransactionDeleted(TransactionId),
    TransactionNotFound(TransactionId),
    LimitSet { month: MonthKey, limit: Decimal },
    LimitCleared(MonthKey),
    LimitNotSet(MonthKey),
    InvalidLimit(String),
}

/// Renders the monthly summary, the transaction list, and feedback.
pub trait SummaryView {
    fn render_summary(&mut self, month: MonthKey, summary: &BudgetSummary);
    /// Receives the month's transactions already sorted newest first.
    fn render_transactions(&mut self, transactions: &[Transaction]);
    fn render_validation_errors(&mut self, errors: &[FieldError]);
    fn render_notice(&mut self, notice: &Notice);
}

/// Renders the income / expenses / savings bars.
pub trait ChartView {
    fn render_chart(&mut self, month: MonthKey, data: &ChartData);
}

pub struct Controller<S, C, V, G>
where
    S: KeyValueStore,
    C: Clock,
    V: SummaryView,
    G: ChartView,
{
    data: DataManager<S, C>,
    view: V,
    chart: G,
}

impl<S, C, V, G> Controller<S, C, V, G>
where
    S: KeyValueStore,
    C: Clock,
    V: SummaryView,
    G: ChartView,
{
    pub fn new(data: DataManager<S, C>, view: V, chart: G) -> Self {
        Self { data, view, chart }
    }

    pub fn data(&self) -> &DataManager<S, C> {
        &self.data
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn chart(&self) -> &G {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut G {
        &mut self.chart
    }

    pub fn into_parts(self) -> (DataManager<S, C>, V, G) {
        (self.data, self.view, self.chart)
    }

    /// Re-reads the selected month's aggregates and hands them to both renderers.
    pub fn refresh(&mut self) {
        let month = self.data.selected_month();
        let summary = self.data.summary_for_month(month);
        let chart = self.data.chart_for_month(month);
        let transactions = SummaryService::sorted_for_display(self.data.transactions_in(month));
        self.view.render_summary(month, &summary);
        self.view.render_transactions(&transactions);
        self.chart.render_chart(month, &chart);
    }

    /// Returns `Ok(None)` when the input fails validation; the errors are rendered instead.
    pub fn submit_transaction(&mut self, input: &TransactionInput) -> Result<Option<Transaction>> {
        let draft = match parse_transaction(input) {
            Ok(draft) => draft,
            Err(report) => {
                warn!(errors = report.errors.len(), "transaction rejected by validation");
                self.view.render_validation_errors(&report.errors);
                return Ok(None);
            }
        };
        let stored = self.data.add_transaction(draft).inspect_err(|err| {
            error!(%err, "failed to persist new transaction");
        })?;
        self.view
            .render_notice(&Notice::TransactionAdded(stored.clone()));
        self.refresh();
        Ok(Some(stored))
    }

    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<bool> {
        let removed = self.data.delete_transaction(id).inspect_err(|err| {
            error!(%err, %id, "failed to persist deletion");
        })?;
        let notice = if removed {
            Notice::TransactionDeleted(id.clone())
        } else {
            Notice::TransactionNotFound(id.clone())
        };
        self.view.render_notice(&notice);
        if removed {
            self.refresh();
        }
        Ok(removed)
    }

    /// Sets the selected month's limit from raw text. Invalid text is reported, not raised.
    pub fn set_budget_limit(&mut self, raw: &str) -> Result<bool> {
        let limit = match parse_budget_limit(raw) {
            Ok(limit) => limit,
            Err(_) => {
                warn!(input = raw, "budget limit rejected");
                self.view
                    .render_notice(&Notice::InvalidLimit(raw.trim().to_string()));
                return Ok(false);
            }
        };
        let month = self.data.selected_month();
        self.data
            .set_budget_limit(month.year(), month.month(), limit)
            .inspect_err(|err| error!(%err, %month, "failed to persist budget limit"))?;
        self.view.render_notice(&Notice::LimitSet { month, limit });
        self.refresh();
        Ok(true)
    }

    pub fn clear_budget_limit(&mut self) -> Result<bool> {
        let month = self.data.selected_month();
        let cleared = self
            .data
            .clear_budget_limit(month)
            .inspect_err(|err| error!(%err, %month, "failed to persist budget limit removal"))?;
        if cleared {
            self.view.render_notice(&Notice::LimitCleared(month));
            self.refresh();
        } else {
            self.view.render_notice(&Notice::LimitNotSet(month));
        }
        Ok(cleared)
    }

    pub fn select_month(&mut self, year: i32, month: u32) -> Result<MonthKey> {
        let selected = self.data.set_selected_month(year, month)?;
        self.refresh();
        Ok(selected)
    }

    pub fn previous_month(&mut self) -> MonthKey {
        let selected = self.data.select_previous_month();
        self.refresh();
        selected
    }

    pub fn next_month(&mut self) -> MonthKey {
        let selected = self.data.select_next_month();
        self.refresh();
        selected
    }
}
