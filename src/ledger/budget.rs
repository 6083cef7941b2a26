use std::{collections::BTreeMap, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::month::MonthKey;
use super::transaction::amount_in_range;
use crate::errors::BudgetError;

/// Whether a month's expenses stay within its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Within,
    Over,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetStatus::Within => f.write_str("within"),
            BudgetStatus::Over => f.write_str("over"),
        }
    }
}

/// The summary record handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub budget_limit: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub remaining_budget: Decimal,
    pub status: BudgetStatus,
}

/// Bar values for the income / expenses / savings chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

/// Per-month spending ceilings. Every stored value is strictly positive and
/// no larger than [`MAX_AMOUNT`](super::MAX_AMOUNT).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetLimits(BTreeMap<MonthKey, Decimal>);

impl BudgetLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit for `month`, or zero when none has been set.
    pub fn get(&self, month: MonthKey) -> Decimal {
        self.0.get(&month).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, month: MonthKey, value: Decimal) -> Result<(), BudgetError> {
        if !amount_in_range(value) {
            return Err(BudgetError::InvalidBudgetLimit(value.to_string()));
        }
        self.0.insert(month, value);
        Ok(())
    }

    pub fn clear(&mut self, month: MonthKey) -> Option<Decimal> {
        self.0.remove(&month)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MonthKey, &Decimal)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops entries outside the accepted range, returning how many were removed.
    pub(crate) fn retain_in_range(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|_, value| amount_in_range(*value));
        before - self.0.len()
    }
}
