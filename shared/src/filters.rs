//! List filters for the sales, stock and product screens
//!
//! Day filters compare calendar days only; the time of day never matters.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Product, Sale, StockTransaction};
use crate::types::{PaymentType, TransactionType};

/// Payment type restriction on the sales list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl PaymentFilter {
    pub fn matches(&self, payment_type: PaymentType) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Credit => payment_type == PaymentType::Credit,
            PaymentFilter::Debit => payment_type == PaymentType::Debit,
        }
    }
}

/// Time window relative to "today"
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeFilter {
    Day,
    Month,
    Year,
    #[default]
    All,
}

impl TimeFilter {
    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            TimeFilter::Day => date == today,
            TimeFilter::Month => date.month() == today.month() && date.year() == today.year(),
            TimeFilter::Year => date.year() == today.year(),
            TimeFilter::All => true,
        }
    }
}

/// Sales list criteria
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesFilter {
    /// Matches product name, customer name (case-insensitive) or phone
    pub search: String,
    pub payment: PaymentFilter,
    /// When set, overrides `time`
    pub specific_date: Option<NaiveDate>,
    pub time: TimeFilter,
}

pub fn filter_sales<'a>(
    sales: &'a [Sale],
    products: &[Product],
    filter: &SalesFilter,
    today: NaiveDate,
) -> Vec<&'a Sale> {
    let names = product_names(products);
    let needle = filter.search.to_lowercase();

    sales
        .iter()
        .filter(|s| {
            let product_match = names
                .get(&s.product_id)
                .map(|n| n.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let phone_match = s
                .customer_phone
                .as_deref()
                .map(|p| p.contains(filter.search.as_str()))
                .unwrap_or(false);
            product_match || s.customer_name.to_lowercase().contains(&needle) || phone_match
        })
        .filter(|s| filter.payment.matches(s.payment_type))
        .filter(|s| match filter.specific_date {
            Some(day) => s.date.date() == day,
            None => filter.time.matches(s.date.date(), today),
        })
        .collect()
}

/// Quantity sold of one product within a filtered sales list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductQuantity {
    pub product_id: Uuid,
    pub name: String,
    pub category: String,
    pub quantity: i64,
}

/// Per-product quantities, largest first. Sales of unknown products are skipped.
pub fn product_summary(sales: &[&Sale], products: &[Product]) -> Vec<ProductQuantity> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut rows: Vec<ProductQuantity> = Vec::new();

    for sale in sales {
        let Some(product) = products.iter().find(|p| p.id == sale.product_id) else {
            continue;
        };
        let position = *index.entry(product.id).or_insert_with(|| {
            rows.push(ProductQuantity {
                product_id: product.id,
                name: product.name.clone(),
                category: product.category.clone().unwrap_or_default(),
                quantity: 0,
            });
            rows.len() - 1
        });
        rows[position].quantity += i64::from(sale.quantity);
    }

    rows.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    rows
}

/// Stock inward log.
///
/// Only inwards are listed. A specific day takes precedence over the search
/// text; otherwise the search matches product name or party name.
pub fn filter_stock_logs<'a>(
    transactions: &'a [StockTransaction],
    products: &[Product],
    search: &str,
    specific_date: Option<NaiveDate>,
) -> Vec<&'a StockTransaction> {
    let names = product_names(products);
    let needle = search.to_lowercase();

    transactions
        .iter()
        .filter(|t| t.transaction_type == TransactionType::In)
        .filter(|t| match specific_date {
            Some(day) => t.date.date() == day,
            None => {
                names
                    .get(&t.product_id)
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false)
                    || t.party_name.to_lowercase().contains(&needle)
            }
        })
        .collect()
}

/// Products matching a name search and, optionally, one company
pub fn filter_products<'a>(
    products: &'a [Product],
    search: &str,
    company_id: Option<Uuid>,
) -> Vec<&'a Product> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .filter(|p| company_id.map(|id| p.company_id == Some(id)).unwrap_or(true))
        .collect()
}

/// One row of a product's combined history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "entry_type", rename_all = "snake_case")]
pub enum HistoryEntry {
    Refill(StockTransaction),
    Sale(Sale),
}

impl HistoryEntry {
    pub fn date(&self) -> NaiveDateTime {
        match self {
            HistoryEntry::Refill(t) => t.date,
            HistoryEntry::Sale(s) => s.date,
        }
    }
}

/// Refills and sales of one product, newest first
pub fn product_history(
    product_id: Uuid,
    transactions: &[StockTransaction],
    sales: &[Sale],
) -> Vec<HistoryEntry> {
    let mut history: Vec<HistoryEntry> = transactions
        .iter()
        .filter(|t| t.product_id == product_id && t.transaction_type == TransactionType::In)
        .cloned()
        .map(HistoryEntry::Refill)
        .chain(
            sales
                .iter()
                .filter(|s| s.product_id == product_id)
                .cloned()
                .map(HistoryEntry::Sale),
        )
        .collect();

    history.sort_by(|a, b| b.date().cmp(&a.date()));
    history
}

fn product_names(products: &[Product]) -> HashMap<Uuid, &str> {
    products.iter().map(|p| (p.id, p.name.as_str())).collect()
}
