//! Sales models

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::PaymentType;

/// A recorded sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub selling_price: Decimal,
    /// Cost snapshot taken when the sale was recorded
    pub purchase_price: Decimal,
    pub customer_name: String,
    /// Optional phone number for credit follow-ups
    pub customer_phone: Option<String>,
    pub total_amount: Decimal,
    pub payment_type: PaymentType,
    #[serde(deserialize_with = "crate::types::flexible_datetime::deserialize")]
    pub date: NaiveDateTime,
}

impl Sale {
    /// Profit of this sale: (selling - purchase) * quantity
    pub fn profit(&self) -> Decimal {
        (self.selling_price - self.purchase_price) * Decimal::from(self.quantity)
    }

    pub fn is_credit(&self) -> bool {
        self.payment_type == PaymentType::Credit
    }
}

/// Input for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub product_id: Uuid,
    pub quantity: i32,
    pub customer_name: String,
    pub selling_price: Decimal,
    pub payment_type: PaymentType,
    pub customer_phone: Option<String>,
    /// Backdated sale time; the backend stamps "now" when absent
    pub sale_date: Option<DateTime<Utc>>,
}

/// Partial sale update. Only fields that are set are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub selling_price: Option<Decimal>,
    pub payment_type: Option<PaymentType>,
}

impl SaleUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.quantity.is_none()
            && self.customer_name.is_none()
            && self.customer_phone.is_none()
            && self.selling_price.is_none()
            && self.payment_type.is_none()
    }
}
