//! Derived figures computed from the in-memory collections

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Company, Product, Sale, Stock};
use crate::types::PaymentType;

/// Profit of a sale: (selling - purchase) * quantity
pub fn calculate_profit(sale: &Sale) -> Decimal {
    sale.profit()
}

/// Remaining stock of a product, 0 when no balance is known
pub fn remaining_stock(stocks: &[Stock], product_id: Uuid) -> i64 {
    stocks
        .iter()
        .find(|s| s.product_id == product_id)
        .map(|s| s.remaining)
        .unwrap_or(0)
}

/// A product without a stock row counts as low
pub fn is_low_stock(product: &Product, stocks: &[Stock]) -> bool {
    match stocks.iter().find(|s| s.product_id == product.id) {
        Some(stock) => stock.remaining <= i64::from(product.min_stock),
        None => true,
    }
}

pub fn low_stock_products<'a>(products: &'a [Product], stocks: &[Stock]) -> Vec<&'a Product> {
    products.iter().filter(|p| is_low_stock(p, stocks)).collect()
}

/// Credit and debit totals over a set of sales
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CreditDebitTotals {
    pub credit: Decimal,
    pub debit: Decimal,
}

pub fn credit_debit_totals<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> CreditDebitTotals {
    sales
        .into_iter()
        .fold(CreditDebitTotals::default(), |mut acc, sale| {
            match sale.payment_type {
                PaymentType::Credit => acc.credit += sale.total_amount,
                PaymentType::Debit => acc.debit += sale.total_amount,
            }
            acc
        })
}

/// Credit/debit totals of sales recorded on `today`
pub fn today_credit_debit(sales: &[Sale], today: NaiveDate) -> CreditDebitTotals {
    credit_debit_totals(sales.iter().filter(|s| s.date.date() == today))
}

/// Locally recomputed revenue/profit for one day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTrendPoint {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub profit: Decimal,
}

/// Number of days shown in the local trend comparison
pub const DAILY_TREND_DAYS: usize = 15;

/// Group sales by calendar day, oldest first, keeping the last `limit` days.
///
/// This is recomputed from raw sales and is independent of the backend's
/// period summary breakdown.
pub fn daily_trend(sales: &[Sale], limit: usize) -> Vec<DailyTrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for sale in sales {
        let entry = by_day
            .entry(sale.date.date())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += sale.total_amount;
        entry.1 += sale.profit();
    }

    let skip = by_day.len().saturating_sub(limit);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, (revenue, profit))| DailyTrendPoint {
            date,
            revenue,
            profit,
        })
        .collect()
}

/// Quantity sold and profit per product name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPerformance {
    pub name: String,
    pub quantity_sold: i64,
    pub profit: Decimal,
}

/// Number of products in the top-sellers list
pub const TOP_PRODUCTS: usize = 5;

/// Best sellers by quantity. Sales of unknown products are grouped as "Unknown".
pub fn product_performance(sales: &[Sale], products: &[Product]) -> Vec<ProductPerformance> {
    let names: HashMap<Uuid, &str> = products.iter().map(|p| (p.id, p.name.as_str())).collect();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<ProductPerformance> = Vec::new();

    for sale in sales {
        let name = names.get(&sale.product_id).copied().unwrap_or("Unknown");
        let position = *index.entry(name.to_string()).or_insert_with(|| {
            rows.push(ProductPerformance {
                name: name.to_string(),
                quantity_sold: 0,
                profit: Decimal::ZERO,
            });
            rows.len() - 1
        });
        rows[position].quantity_sold += i64::from(sale.quantity);
        rows[position].profit += sale.profit();
    }

    rows.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold));
    rows.truncate(TOP_PRODUCTS);
    rows
}

/// Revenue attributed to one company
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyShare {
    pub name: String,
    pub revenue: Decimal,
}

/// Revenue per owning company; unresolved products count as "Other"
pub fn company_distribution(
    sales: &[Sale],
    products: &[Product],
    companies: &[Company],
) -> Vec<CompanyShare> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CompanyShare> = Vec::new();

    for sale in sales {
        let name = products
            .iter()
            .find(|p| p.id == sale.product_id)
            .and_then(|p| p.company_id)
            .and_then(|company_id| companies.iter().find(|c| c.id == company_id))
            .map(|c| c.name.as_str())
            .unwrap_or("Other");

        let position = *index.entry(name.to_string()).or_insert_with(|| {
            rows.push(CompanyShare {
                name: name.to_string(),
                revenue: Decimal::ZERO,
            });
            rows.len() - 1
        });
        rows[position].revenue += sale.total_amount;
    }

    rows
}
