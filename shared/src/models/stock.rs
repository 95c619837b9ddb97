//! Stock ledger models

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::TransactionType;

/// Party name recorded when an inward is entered without one
pub const DEFAULT_SUPPLIER: &str = "Direct Supply";

/// An append-only stock ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockTransaction {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Supplier for inwards, customer for sale-driven outwards
    pub party_name: String,
    pub purchase_price: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "crate::types::flexible_datetime::deserialize")]
    pub date: NaiveDateTime,
}

/// A delivery of product increasing inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInward {
    pub product_id: Uuid,
    pub quantity: i32,
    pub party_name: String,
    pub purchase_price: Decimal,
}

impl StockInward {
    /// Build an inward, substituting the default supplier for a blank party
    pub fn new(product_id: Uuid, quantity: i32, party_name: &str, purchase_price: Decimal) -> Self {
        let party = party_name.trim();
        Self {
            product_id,
            quantity,
            party_name: if party.is_empty() {
                DEFAULT_SUPPLIER.to_string()
            } else {
                party.to_string()
            },
            purchase_price,
        }
    }
}
