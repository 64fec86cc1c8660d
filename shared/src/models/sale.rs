//! Point-of-sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed point-of-sale transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTransaction {
    pub id: Uuid,
    /// Sale code, e.g. PJ-2026-0113
    pub code: String,
    pub shelter_id: Uuid,
    pub cashier: Option<String>,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub change_given: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One line of a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// A sale with its line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(flatten)]
    pub sale: SaleTransaction,
    pub items: Vec<SaleItem>,
}
