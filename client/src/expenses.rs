//! Expense ledger for a selected day
//!
//! Entries are signed: negative amounts are expenses, positive amounts are
//! income. Forms collect a positive magnitude plus an [`EntryKind`](shared::EntryKind) toggle
//! and the sign is applied on submit.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use shared::{validate_expense_form, DailyExpenseTotal, Expense, ExpenseForm};

use crate::api::ApiClient;
use crate::error::ClientResult;

#[derive(Debug, Clone)]
struct DayView {
    date: NaiveDate,
    expenses: Vec<Expense>,
    daily_total: Decimal,
}

/// Expense page model: the entries and net total of one selected day
#[derive(Clone)]
pub struct ExpenseLedger {
    api: ApiClient,
    view: Arc<RwLock<DayView>>,
}

impl ExpenseLedger {
    pub fn new(api: ApiClient, date: NaiveDate) -> Self {
        Self {
            api,
            view: Arc::new(RwLock::new(DayView {
                date,
                expenses: Vec::new(),
                daily_total: Decimal::ZERO,
            })),
        }
    }

    pub async fn selected_date(&self) -> NaiveDate {
        self.view.read().await.date
    }

    pub async fn expenses(&self) -> Vec<Expense> {
        self.view.read().await.expenses.clone()
    }

    pub async fn daily_total(&self) -> Decimal {
        self.view.read().await.daily_total
    }

    /// Switch to another day and load it
    pub async fn select_date(&self, date: NaiveDate) {
        self.view.write().await.date = date;
        self.reload().await;
    }

    /// Reload entries and total for the selected day.
    ///
    /// A failed list keeps the previous entries; a failed total shows 0.
    pub async fn reload(&self) {
        let date = self.selected_date().await;
        let (expenses, total) = tokio::join!(self.list(date), self.fetch_daily_total(date));

        let mut view = self.view.write().await;
        if view.date != date {
            // Another day was selected meanwhile
            return;
        }
        match expenses {
            Ok(expenses) => view.expenses = expenses,
            Err(e) => tracing::error!("Failed to load expenses for {}: {}", date, e),
        }
        view.daily_total = total;
    }

    // ========================================================================
    // Backend operations
    // ========================================================================

    pub async fn list(&self, date: NaiveDate) -> ClientResult<Vec<Expense>> {
        self.api.list_expenses(Some(date)).await
    }

    pub async fn get(&self, id: Uuid) -> ClientResult<Expense> {
        self.api.get_expense(id).await
    }

    /// Record a new entry on the selected day
    pub async fn create(&self, form: &ExpenseForm) -> ClientResult<Expense> {
        validate_expense_form(form)?;
        let date = self.selected_date().await;
        let expense = self.api.create_expense(form, Some(date)).await?;
        tracing::info!("Recorded {} of {}", expense.name, expense.amount);
        self.reload().await;
        Ok(expense)
    }

    pub async fn update(&self, id: Uuid, form: &ExpenseForm) -> ClientResult<Expense> {
        validate_expense_form(form)?;
        let expense = self.api.update_expense(id, form).await?;
        self.reload().await;
        Ok(expense)
    }

    /// Soft delete; returns the record as the backend last saw it
    pub async fn delete(&self, id: Uuid) -> ClientResult<Expense> {
        let expense = self.api.delete_expense(id).await?;
        self.reload().await;
        Ok(expense)
    }

    /// Net total for a day, 0 when it cannot be fetched
    pub async fn fetch_daily_total(&self, date: NaiveDate) -> Decimal {
        match self.api.expense_daily_total(date).await {
            Ok(total) => total.total,
            Err(e) => {
                tracing::error!("Failed to load daily total for {}: {}", date, e);
                Decimal::ZERO
            }
        }
    }

    pub async fn by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClientResult<Vec<DailyExpenseTotal>> {
        self.api.expenses_by_date_range(start, end).await
    }
}
