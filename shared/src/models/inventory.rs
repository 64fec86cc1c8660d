//! Inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stock movement for a product at a shelter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity_kg: Decimal,
    /// The purchase, batch, or sale that produced this movement
    pub reference_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Sources of stock movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    PurchaseIn,
    BatchOut,
    BatchIn,
    SaleOut,
    Adjustment,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::PurchaseIn => "purchase_in",
            MovementType::BatchOut => "batch_out",
            MovementType::BatchIn => "batch_in",
            MovementType::SaleOut => "sale_out",
            MovementType::Adjustment => "adjustment",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "purchase_in" => Some(MovementType::PurchaseIn),
            "batch_out" => Some(MovementType::BatchOut),
            "batch_in" => Some(MovementType::BatchIn),
            "sale_out" => Some(MovementType::SaleOut),
            "adjustment" => Some(MovementType::Adjustment),
            _ => None,
        }
    }
}

/// Current stock of one product at one shelter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockBalance {
    pub shelter_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub balance_kg: Decimal,
    pub total_in_kg: Decimal,
    pub total_out_kg: Decimal,
}

/// Stock position across all shelters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventorySummary {
    pub balances: Vec<StockBalance>,
    pub total_kg: Decimal,
    pub as_of: DateTime<Utc>,
}
