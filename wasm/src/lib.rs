//! WebAssembly module for AgriManage
//!
//! Exposes the browser-side computations:
//! - Customer payment ledger from raw sales
//! - Expense sign convention
//! - Phone and sale validation
//! - Local daily trend and reporting windows

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::{
    customer_payments, daily_trend, filter_customers, validate_customer_phone, CustomerFilter,
    EntryKind, PeriodSelection, Sale,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("AgriManage module loaded"));
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn parse_sales(sales_json: &str) -> Result<Vec<Sale>, String> {
    serde_json::from_str(sales_json).map_err(|e| format!("Invalid sales JSON: {}", e))
}

fn parse_filter(filter: &str) -> CustomerFilter {
    match filter {
        "outstanding" => CustomerFilter::Outstanding,
        "paid" => CustomerFilter::Paid,
        _ => CustomerFilter::All,
    }
}

// ============================================================================
// Customer ledger
// ============================================================================

fn ledger_json(sales_json: &str, search: &str, filter: &str) -> Result<String, String> {
    let sales = parse_sales(sales_json)?;
    let ledger = customer_payments(&sales);
    let rows = filter_customers(&ledger, search, parse_filter(filter));
    serde_json::to_string(&rows).map_err(|e| e.to_string())
}

/// Customer balances from a JSON array of sales, highest outstanding first.
/// `filter` is one of `all`, `outstanding`, `paid`.
#[wasm_bindgen]
pub fn customer_ledger(sales_json: &str, search: &str, filter: &str) -> Result<String, JsValue> {
    ledger_json(sales_json, search, filter).map_err(|e| JsValue::from_str(&e))
}

// ============================================================================
// Expenses and sales
// ============================================================================

/// Amount to persist for an expense form: negative unless it is income
#[wasm_bindgen]
pub fn signed_expense_amount(magnitude: f64, income: bool) -> f64 {
    let kind = if income {
        EntryKind::Income
    } else {
        EntryKind::Expense
    };
    to_f64(kind.signed(to_decimal(magnitude)))
}

/// Profit of a sale line
#[wasm_bindgen]
pub fn calculate_sale_profit(selling_price: f64, purchase_price: f64, quantity: i32) -> f64 {
    to_f64((to_decimal(selling_price) - to_decimal(purchase_price)) * Decimal::from(quantity))
}

/// Phone validation message, or nothing when the number is acceptable
#[wasm_bindgen]
pub fn customer_phone_error(phone: &str) -> Option<String> {
    validate_customer_phone(phone).err().map(str::to_string)
}

/// Low stock check; a product without a known balance counts as low
#[wasm_bindgen]
pub fn is_low_stock(remaining: Option<f64>, min_stock: i32) -> bool {
    match remaining {
        Some(remaining) => remaining <= f64::from(min_stock),
        None => true,
    }
}

// ============================================================================
// Reporting
// ============================================================================

fn trend_json(sales_json: &str, days: usize) -> Result<String, String> {
    let sales = parse_sales(sales_json)?;
    serde_json::to_string(&daily_trend(&sales, days)).map_err(|e| e.to_string())
}

/// Revenue and profit per calendar day for the latest `days` days with sales
#[wasm_bindgen]
pub fn sales_daily_trend(sales_json: &str, days: usize) -> Result<String, JsValue> {
    trend_json(sales_json, days).map_err(|e| JsValue::from_str(&e))
}

fn range_json(period: &str, today: NaiveDate) -> Result<String, String> {
    let selection = match period {
        "1m" => PeriodSelection::OneMonth,
        "3m" => PeriodSelection::ThreeMonths,
        "6m" => PeriodSelection::SixMonths,
        "1y" => PeriodSelection::OneYear,
        other => return Err(format!("Unknown period: {}", other)),
    };
    serde_json::to_string(&selection.date_range(today)).map_err(|e| e.to_string())
}

/// `{start, end}` of a preset window (`1m`, `3m`, `6m`, `1y`) ending today
#[wasm_bindgen]
pub fn period_date_range(period: &str) -> Result<String, JsValue> {
    let now = js_sys::Date::new_0();
    let today = NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .ok_or_else(|| JsValue::from_str("Invalid local date"))?;
    range_json(period, today).map_err(|e| JsValue::from_str(&e))
}
