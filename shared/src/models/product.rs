//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CommodityType;

/// A commodity product the cooperative buys or sells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    /// Catalog name; drives commodity classification at intake
    pub name: String,
    pub unit: ProductUnit,
    /// Indicative price per unit shown to the operator; the purchase
    /// price is always entered manually
    pub reference_price: Option<Decimal>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Commodity category derived from the catalog name
    pub fn commodity_type(&self) -> CommodityType {
        CommodityType::from_product_name(&self.name)
    }
}

/// Units products are traded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductUnit {
    Kilogram,
    Liter,
    Piece,
}

impl ProductUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::Kilogram => "kilogram",
            ProductUnit::Liter => "liter",
            ProductUnit::Piece => "piece",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kilogram" => Some(ProductUnit::Kilogram),
            "liter" => Some(ProductUnit::Liter),
            "piece" => Some(ProductUnit::Piece),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductUnit::Kilogram => write!(f, "kg"),
            ProductUnit::Liter => write!(f, "L"),
            ProductUnit::Piece => write!(f, "pcs"),
        }
    }
}
