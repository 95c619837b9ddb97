//! Validation utilities for AgriManage
//!
//! Form-level checks applied before anything is sent to the backend.

use rust_decimal::Decimal;

use crate::models::{ExpenseForm, NewSale, SaleUpdate, StockInward};

/// Longest name the backend accepts for an expense entry
pub const MAX_NAME_LENGTH: usize = 500;

// ============================================================================
// Field Validations
// ============================================================================

/// Validate an optional customer phone number.
/// Blank is allowed; otherwise exactly 11 digits (e.g. 03001234567).
pub fn validate_customer_phone(phone: &str) -> Result<(), &'static str> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Ok(());
    }
    if phone.len() == 11 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Phone number must be exactly 11 digits (e.g. 03001234567)")
    }
}

/// Validate a quantity is positive
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a money amount is positive
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than zero");
    }
    Ok(())
}

/// Validate a price is not negative
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(())
}

/// Validate a required name field
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Name is required");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 500 characters");
    }
    Ok(())
}

// ============================================================================
// Form Validations
// ============================================================================

/// Validate a sale before recording it
pub fn validate_new_sale(sale: &NewSale) -> Result<(), &'static str> {
    validate_quantity(sale.quantity)?;
    validate_name(&sale.customer_name)?;
    validate_price(sale.selling_price)?;
    if let Some(phone) = &sale.customer_phone {
        validate_customer_phone(phone)?;
    }
    Ok(())
}

/// Validate the fields of a partial sale update that are set
pub fn validate_sale_update(update: &SaleUpdate) -> Result<(), &'static str> {
    if let Some(quantity) = update.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(name) = &update.customer_name {
        validate_name(name)?;
    }
    if let Some(price) = update.selling_price {
        validate_price(price)?;
    }
    if let Some(phone) = &update.customer_phone {
        validate_customer_phone(phone)?;
    }
    Ok(())
}

/// Validate a stock inward
pub fn validate_stock_inward(inward: &StockInward) -> Result<(), &'static str> {
    validate_quantity(inward.quantity)?;
    validate_price(inward.purchase_price)?;
    Ok(())
}

/// Validate an expense/income form. The magnitude must be positive; the sign
/// comes from the kind toggle.
pub fn validate_expense_form(form: &ExpenseForm) -> Result<(), &'static str> {
    validate_name(&form.name)?;
    validate_amount(form.magnitude)?;
    if form.quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}
