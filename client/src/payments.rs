//! Customer payments view
//!
//! Balances are derived from the sales held by the [`DataStore`]; nothing
//! here is persisted.

use rust_decimal::Decimal;

use shared::{
    adjustment_notice, customer_payments, filter_customers, payment_totals, AdjustmentKind,
    CustomerFilter, CustomerPayment, PaymentTotals,
};

use crate::error::ClientResult;
use crate::store::DataStore;

/// Ledger rows plus headline totals
#[derive(Debug, Clone)]
pub struct PaymentsOverview {
    pub customers: Vec<CustomerPayment>,
    pub totals: PaymentTotals,
}

pub struct PaymentsView {
    store: DataStore,
}

impl PaymentsView {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// Every customer in first-seen order
    pub async fn ledger(&self) -> Vec<CustomerPayment> {
        customer_payments(&self.store.sales().await)
    }

    /// Matching customers, highest outstanding balance first
    pub async fn overview(&self, search: &str, filter: CustomerFilter) -> PaymentsOverview {
        let ledger = self.ledger().await;
        let totals = payment_totals(&ledger);
        let customers = filter_customers(&ledger, search, filter)
            .into_iter()
            .cloned()
            .collect();

        PaymentsOverview { customers, totals }
    }

    /// Acknowledge a manual adjustment. Balances are not changed.
    pub fn adjust_balance(
        &self,
        customer: &CustomerPayment,
        amount: Decimal,
        kind: AdjustmentKind,
    ) -> ClientResult<String> {
        let notice = adjustment_notice(kind, amount)?;
        tracing::info!("{} ({})", notice, customer.customer_name);
        Ok(notice)
    }
}
