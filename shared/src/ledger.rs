//! Customer payment ledger
//!
//! Customers are keyed by lowercased name. There is no stable customer
//! identifier, so two people with the same name share one ledger row.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Sale;
use crate::types::PaymentType;

/// Per-customer credit/paid aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerPayment {
    /// Spelling of the first sale seen for this customer
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub total_credit: Decimal,
    pub total_paid: Decimal,
    /// `total_credit - total_paid`
    pub outstanding: Decimal,
    pub last_transaction: NaiveDateTime,
    pub sales_count: u32,
}

/// Which customers the payments screen lists
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerFilter {
    #[default]
    All,
    /// Outstanding balance above zero
    Outstanding,
    /// Nothing owed (outstanding at or below zero)
    Paid,
}

/// Headline numbers of the payments screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PaymentTotals {
    /// Sum of positive outstanding balances only
    pub total_outstanding: Decimal,
    pub total_collected: Decimal,
    pub customers_with_debt: usize,
    pub customer_count: usize,
}

/// Direction of a manual balance adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Customer paid part of the balance
    Received,
    /// Additional credit given
    Credit,
}

/// Aggregate sales per customer in a single pass.
///
/// Rows keep first-seen order; use [`filter_customers`] for the display order.
pub fn customer_payments(sales: &[Sale]) -> Vec<CustomerPayment> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CustomerPayment> = Vec::new();

    for sale in sales {
        let key = sale.customer_name.to_lowercase();
        let position = *index.entry(key).or_insert_with(|| {
            rows.push(CustomerPayment {
                customer_name: sale.customer_name.clone(),
                customer_phone: sale.customer_phone.clone(),
                total_credit: Decimal::ZERO,
                total_paid: Decimal::ZERO,
                outstanding: Decimal::ZERO,
                last_transaction: sale.date,
                sales_count: 0,
            });
            rows.len() - 1
        });

        let row = &mut rows[position];
        row.sales_count += 1;
        match sale.payment_type {
            PaymentType::Credit => row.total_credit += sale.total_amount,
            PaymentType::Debit => row.total_paid += sale.total_amount,
        }
        if sale.date > row.last_transaction {
            row.last_transaction = sale.date;
        }
    }

    for row in &mut rows {
        row.outstanding = row.total_credit - row.total_paid;
    }

    rows
}

/// Search and filter ledger rows, highest outstanding first
pub fn filter_customers<'a>(
    payments: &'a [CustomerPayment],
    search: &str,
    filter: CustomerFilter,
) -> Vec<&'a CustomerPayment> {
    let needle = search.to_lowercase();

    let mut matched: Vec<&CustomerPayment> = payments
        .iter()
        .filter(|c| {
            c.customer_name.to_lowercase().contains(&needle)
                || c.customer_phone
                    .as_deref()
                    .map(|p| p.contains(search))
                    .unwrap_or(false)
        })
        .filter(|c| match filter {
            CustomerFilter::All => true,
            CustomerFilter::Outstanding => c.outstanding > Decimal::ZERO,
            CustomerFilter::Paid => c.outstanding <= Decimal::ZERO,
        })
        .collect();

    matched.sort_by(|a, b| b.outstanding.cmp(&a.outstanding));
    matched
}

pub fn payment_totals(payments: &[CustomerPayment]) -> PaymentTotals {
    PaymentTotals {
        total_outstanding: payments
            .iter()
            .map(|c| c.outstanding)
            .filter(|o| *o > Decimal::ZERO)
            .sum(),
        total_collected: payments.iter().map(|c| c.total_paid).sum(),
        customers_with_debt: payments
            .iter()
            .filter(|c| c.outstanding > Decimal::ZERO)
            .count(),
        customer_count: payments.len(),
    }
}

/// Validate a manual balance adjustment and describe it.
///
/// Adjustments are not persisted anywhere; callers only show the message.
pub fn adjustment_notice(kind: AdjustmentKind, amount: Decimal) -> Result<String, &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Please enter a valid amount");
    }
    let amount = amount.normalize();
    Ok(match kind {
        AdjustmentKind::Received => format!("Customer paid Rs. {}", amount),
        AdjustmentKind::Credit => format!("Given additional credit of Rs. {}", amount),
    })
}
