//! Wire records exchanged with the backend
//!
//! Responses are decoded into these records first and then mapped onto the
//! shared models, so renamed or missing backend fields are handled in one
//! place. Payload structs mirror the backend's create/update schemas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{
    ExpenseForm, NewProduct, NewSale, PaymentType, Product, Sale, SaleUpdate, Stock,
    StockInward, StockTransaction, TransactionType,
};

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(default = "default_min_stock")]
    pub min_stock: i32,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    #[serde(default)]
    pub current_stock: Option<i64>,
}

fn default_min_stock() -> i32 {
    5
}

impl ProductRecord {
    /// Split into the product and its server-side stock balance
    pub fn into_parts(self) -> (Product, Stock) {
        let stock = Stock::from_server_balance(self.id, self.current_stock);
        let product = Product {
            id: self.id,
            company_id: self.company_id,
            name: self.name,
            category: self.category,
            unit: self.unit,
            purchase_price: self.purchase_price.unwrap_or(Decimal::ZERO),
            min_stock: self.min_stock,
        };
        (product, stock)
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(deserialize_with = "shared::flexible_datetime::deserialize")]
    pub created_at: NaiveDateTime,
}

impl From<TransactionRecord> for StockTransaction {
    fn from(record: TransactionRecord) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            quantity: record.quantity,
            party_name: record.party_name.unwrap_or_default(),
            purchase_price: record.purchase_price.unwrap_or(Decimal::ZERO),
            transaction_type: record.transaction_type,
            date: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaleRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    pub quantity: i32,
    pub selling_price: Decimal,
    pub payment_type: PaymentType,
    pub purchase_price: Decimal,
    pub total_amount: Decimal,
    #[serde(deserialize_with = "shared::flexible_datetime::deserialize")]
    pub created_at: NaiveDateTime,
}

impl From<SaleRecord> for Sale {
    fn from(record: SaleRecord) -> Self {
        Self {
            id: record.id,
            product_id: record.product_id,
            quantity: record.quantity,
            selling_price: record.selling_price,
            purchase_price: record.purchase_price,
            customer_name: record.customer_name,
            customer_phone: record.customer_phone,
            total_amount: record.total_amount,
            payment_type: record.payment_type,
            date: record.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CompanyPayload<'a> {
    pub name: &'a str,
}

/// New products never carry a purchase price; it is set by stock inwards
#[derive(Debug, Serialize)]
pub struct ProductCreatePayload<'a> {
    pub name: &'a str,
    pub category: Option<&'a str>,
    pub unit: &'a str,
    pub min_stock: i32,
    pub company_id: Option<Uuid>,
}

impl<'a> From<&'a NewProduct> for ProductCreatePayload<'a> {
    fn from(product: &'a NewProduct) -> Self {
        Self {
            name: &product.name,
            category: product.category.as_deref(),
            unit: &product.unit,
            min_stock: product.min_stock,
            company_id: product.company_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StockInPayload<'a> {
    pub product_id: Uuid,
    pub quantity: i32,
    pub party_name: &'a str,
    pub purchase_price: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl<'a> From<&'a StockInward> for StockInPayload<'a> {
    fn from(inward: &'a StockInward) -> Self {
        Self {
            product_id: inward.product_id,
            quantity: inward.quantity,
            party_name: &inward.party_name,
            purchase_price: inward.purchase_price,
            transaction_type: TransactionType::In,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleCreatePayload<'a> {
    pub product_id: Uuid,
    pub customer_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<&'a str>,
    pub quantity: i32,
    pub selling_price: Decimal,
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl<'a> From<&'a NewSale> for SaleCreatePayload<'a> {
    fn from(sale: &'a NewSale) -> Self {
        Self {
            product_id: sale.product_id,
            customer_name: sale.customer_name.trim(),
            customer_phone: sale
                .customer_phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty()),
            quantity: sale.quantity,
            selling_price: sale.selling_price,
            payment_type: sale.payment_type,
            created_at: sale.sale_date,
        }
    }
}

/// Only the fields that are set go over the wire
#[derive(Debug, Serialize)]
pub struct SaleUpdatePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
}

impl<'a> From<&'a SaleUpdate> for SaleUpdatePayload<'a> {
    fn from(update: &'a SaleUpdate) -> Self {
        Self {
            product_id: update.product_id,
            customer_name: update.customer_name.as_deref(),
            customer_phone: update.customer_phone.as_deref(),
            quantity: update.quantity,
            selling_price: update.selling_price,
            payment_type: update.payment_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpensePayload<'a> {
    pub name: &'a str,
    /// Signed: negative for expenses, positive for income
    pub amount: Decimal,
    pub quantity: i32,
    pub details: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,
}

impl<'a> ExpensePayload<'a> {
    pub fn from_form(form: &'a ExpenseForm, expense_date: Option<NaiveDate>) -> Self {
        Self {
            name: form.name.trim(),
            amount: form.signed_amount(),
            quantity: form.quantity,
            details: form
                .details
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty()),
            expense_date,
        }
    }
}
