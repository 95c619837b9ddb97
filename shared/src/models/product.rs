//! Product and stock balance models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product carried in inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    /// Owning company
    pub company_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    /// Unit label (bag, litre, kg, ...)
    pub unit: String,
    /// Latest purchase price
    pub purchase_price: Decimal,
    /// Low-stock threshold
    pub min_stock: i32,
}

/// Input for creating a product. The purchase price is set by stock inwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub min_stock: i32,
}

/// Full replacement of a product's editable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub company_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub purchase_price: Decimal,
    pub min_stock: i32,
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self {
            company_id: product.company_id,
            name: product.name.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
            purchase_price: product.purchase_price,
            min_stock: product.min_stock,
        }
    }
}

/// Current stock balance of a product.
///
/// `remaining` is the backend's precomputed balance. `total_in` and
/// `total_out` are not derived from the transaction ledger and stay at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    pub product_id: Uuid,
    pub total_in: i64,
    pub total_out: i64,
    pub remaining: i64,
}

impl Stock {
    pub fn from_server_balance(product_id: Uuid, current_stock: Option<i64>) -> Self {
        Self {
            product_id,
            total_in: 0,
            total_out: 0,
            remaining: current_stock.unwrap_or(0),
        }
    }
}
