//! Report models returned by the reporting endpoints

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline dashboard numbers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardStats {
    pub total_inventory_value: Decimal,
    pub total_products: i64,
    pub low_stock_count: i64,
    pub today_sales_revenue: Decimal,
    pub today_sales_profit: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    #[serde(default)]
    pub recent_sales_count: i64,
}

/// One point of the weekly sales chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklySales {
    pub date: String,
    pub sales: Decimal,
}

/// `/reports/` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardReport {
    pub stats: DashboardStats,
    #[serde(default)]
    pub weekly_sales: Vec<WeeklySales>,
}

/// `/reports/period-summary` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodSummary {
    pub period: PeriodInfo,
    pub sales_summary: SalesSummary,
    pub expense_summary: ExpenseSummary,
    pub credit_debit: CreditDebitSummary,
    pub overall: OverallSummary,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyBreakdown>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodInfo {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    pub total_sales_count: i64,
    pub total_quantity_sold: Decimal,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub gross_profit: Decimal,
    /// Percentage
    pub profit_margin: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseSummary {
    pub total_expenses: Decimal,
    pub total_income: Decimal,
    pub net_expense: Decimal,
    pub expense_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditDebitSummary {
    pub total_credit: Decimal,
    pub total_cash: Decimal,
    pub credit_count: i64,
    pub cash_count: i64,
    /// Percentage
    pub credit_percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallSummary {
    pub net_profit: Decimal,
    pub total_transactions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyBreakdown {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub profit: Decimal,
    pub expenses: Decimal,
}

impl PeriodSummary {
    /// The last `days` entries of the daily breakdown, as charted
    pub fn recent_breakdown(&self, days: usize) -> &[DailyBreakdown] {
        let start = self.daily_breakdown.len().saturating_sub(days);
        &self.daily_breakdown[start..]
    }
}
