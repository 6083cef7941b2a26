//! Terminal renderers for the monthly summary, transaction list, and chart.

use std::io::Write;

use rust_decimal::{prelude::ToPrimitive, Decimal};
use tracing::warn;

use super::output::{styled, MessageKind};
use super::table::{Table, TableColumn};
use crate::core::{ChartView, Notice, SummaryView};
use crate::ledger::{BudgetStatus, BudgetSummary, ChartData, FieldError, MonthKey, Transaction};

const BAR_WIDTH: usize = 30;

/// Formats `value` with two decimals, thousands separators, and a leading sign when negative.
pub fn format_amount(symbol: &str, value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac_part}")
}

fn write_line<W: Write>(out: &mut W, text: &str) {
    if let Err(err) = writeln!(out, "{text}") {
        warn!(%err, "failed to write to terminal");
    }
}

pub struct TerminalView<W: Write> {
    out: W,
    currency: String,
    color: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, currency: impl Into<String>, color: bool) -> Self {
        Self {
            out,
            currency: currency.into(),
            color,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn set_currency(&mut self, symbol: impl Into<String>) {
        self.currency = symbol.into();
    }

    fn money(&self, value: Decimal) -> String {
        format_amount(&self.currency, value)
    }

    fn line(&mut self, kind: MessageKind, text: impl std::fmt::Display) {
        let rendered = styled(kind, text, self.color);
        write_line(&mut self.out, &rendered);
    }
}

impl<W: Write> SummaryView for TerminalView<W> {
    fn render_summary(&mut self, month: MonthKey, summary: &BudgetSummary) {
        self.line(MessageKind::Section, month.label());
        let rows = [
            ("Budget limit", summary.budget_limit),
            ("Income", summary.total_income),
            ("Expenses", summary.total_expenses),
            ("Remaining", summary.remaining_budget),
        ];
        for (label, value) in rows {
            let text = format!("{label:<13}{:>14}", self.money(value));
            self.line(MessageKind::Info, text);
        }
        match summary.status {
            BudgetStatus::Within => self.line(MessageKind::Success, "Within budget"),
            BudgetStatus::Over => self.line(MessageKind::Warning, "Over budget"),
        }
    }

    fn render_transactions(&mut self, transactions: &[Transaction]) {
        if transactions.is_empty() {
            self.line(MessageKind::Info, "No transactions for this month.");
            return;
        }
        let mut table = Table::new(vec![
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::left("Description").truncated(32),
            TableColumn::right("Amount"),
            TableColumn::left("Id"),
        ]);
        for txn in transactions {
            let amount = if txn.is_expense() {
                format_amount(&self.currency, -txn.amount)
            } else {
                format_amount(&self.currency, txn.amount)
            };
            table.push_row(vec![
                txn.date.format("%Y-%m-%d").to_string(),
                txn.kind.to_string(),
                txn.description.clone(),
                amount,
                txn.id.to_string(),
            ]);
        }
        let rendered = table.render();
        write_line(&mut self.out, &rendered);
    }

    fn render_validation_errors(&mut self, errors: &[FieldError]) {
        self.line(MessageKind::Error, "Transaction not saved:");
        for err in errors {
            self.line(MessageKind::Info, format!("  - {}", err.message));
        }
    }

    fn render_notice(&mut self, notice: &Notice) {
        match notice {
            Notice::TransactionAdded(txn) => {
                let text = format!(
                    "Added {} `{}` {} on {} (id {})",
                    txn.kind,
                    txn.description,
                    self.money(txn.amount),
                    txn.date,
                    txn.id
                );
                self.line(MessageKind::Success, text);
            }
            Notice::TransactionDeleted(id) => {
                self.line(MessageKind::Success, format!("Deleted transaction {id}"));
            }
            Notice::TransactionNotFound(id) => {
                self.line(MessageKind::Warning, format!("No transaction with id {id}"));
            }
            Notice::LimitSet { month, limit } => {
                let text = format!("Budget limit for {} set to {}", month, self.money(*limit));
                self.line(MessageKind::Success, text);
            }
            Notice::LimitCleared(month) => {
                self.line(MessageKind::Success, format!("Budget limit for {month} cleared"));
            }
            Notice::LimitNotSet(month) => {
                self.line(MessageKind::Warning, format!("No budget limit set for {month}"));
            }
            Notice::InvalidLimit(raw) => {
                let text = format!("Budget limit must be a positive number, got `{raw}`");
                self.line(MessageKind::Error, text);
            }
        }
    }
}

/// Horizontal bar chart of income, expenses, and savings.
pub struct TerminalChart<W: Write> {
    out: W,
    currency: String,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W, currency: impl Into<String>) -> Self {
        Self {
            out,
            currency: currency.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn set_currency(&mut self, symbol: impl Into<String>) {
        self.currency = symbol.into();
    }
}

/// Bar length for `value` relative to `max`, at least one cell for any non-zero value.
/// Expects `value.abs() <= max`, so the ratio stays within `0..=1`.
fn bar_len(value: Decimal, max: Decimal) -> usize {
    if max <= Decimal::ZERO || value == Decimal::ZERO {
        return 0;
    }
    let scaled = (value.abs() / max * Decimal::from(BAR_WIDTH)).round();
    scaled.to_usize().unwrap_or(0).clamp(1, BAR_WIDTH)
}

impl<W: Write> ChartView for TerminalChart<W> {
    fn render_chart(&mut self, _month: MonthKey, data: &ChartData) {
        let max = [data.income, data.expenses, data.savings]
            .iter()
            .map(|value| value.abs())
            .max()
            .unwrap_or(Decimal::ZERO);
        let bars = [
            ("Income", data.income, '#'),
            ("Expenses", data.expenses, '#'),
            ("Savings", data.savings, if data.savings < Decimal::ZERO { '-' } else { '#' }),
        ];
        for (label, value, fill) in bars {
            let bar: String = std::iter::repeat(fill).take(bar_len(value, max)).collect();
            let text = format!(
                "{label:<9}|{bar:<width$}| {}",
                format_amount(&self.currency, value),
                width = BAR_WIDTH
            );
            write_line(&mut self.out, &text);
        }
    }
}
