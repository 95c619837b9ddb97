//! Expense ledger models

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::EntryKind;

/// A signed expense/income entry. Negative amounts are expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub quantity: i32,
    pub details: Option<String>,
    #[serde(deserialize_with = "crate::types::flexible_datetime::deserialize")]
    pub expense_date: NaiveDateTime,
    #[serde(deserialize_with = "crate::types::flexible_datetime::deserialize")]
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, deserialize_with = "crate::types::flexible_datetime::option::deserialize")]
    pub deleted_at: Option<NaiveDateTime>,
}

impl Expense {
    pub fn kind(&self) -> EntryKind {
        EntryKind::from_amount(self.amount)
    }
}

/// What the expense form collects: a positive magnitude plus a kind toggle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseForm {
    pub name: String,
    pub magnitude: Decimal,
    pub kind: EntryKind,
    pub quantity: i32,
    pub details: Option<String>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            magnitude: Decimal::ZERO,
            kind: EntryKind::Expense,
            quantity: 1,
            details: None,
        }
    }
}

impl ExpenseForm {
    pub fn expense(name: impl Into<String>, magnitude: Decimal) -> Self {
        Self {
            name: name.into(),
            magnitude,
            ..Default::default()
        }
    }

    pub fn income(name: impl Into<String>, magnitude: Decimal) -> Self {
        Self {
            name: name.into(),
            magnitude,
            kind: EntryKind::Income,
            ..Default::default()
        }
    }

    /// Amount as persisted, derived at submit time
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.magnitude)
    }

    /// Pre-fill the form for editing an existing entry
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            name: expense.name.clone(),
            magnitude: expense.amount.abs(),
            kind: expense.kind(),
            quantity: expense.quantity,
            details: expense.details.clone(),
        }
    }
}

/// Backend-computed net total for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Backend-computed per-day totals within a range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyExpenseTotal {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: i64,
}
