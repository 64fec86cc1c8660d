//! Purchase transaction models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CommodityType, Deduction, MeasurementInput};

/// A persisted commodity purchase
///
/// Written once a non-rejected grading result passes the submission gate.
/// `quantity_kg` is the graded net weight; the raw measurements and the
/// deduction log travel along as an opaque quality payload for the audit
/// trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseTransaction {
    pub id: Uuid,
    /// Transaction code, e.g. PB-2026-0042
    pub code: String,
    pub farmer_id: Uuid,
    pub shelter_id: Uuid,
    pub product_id: Uuid,
    pub commodity_type: CommodityType,
    pub purchase_date: NaiveDate,
    /// Internal Monitoring System officer who recorded the intake
    pub ims_officer: Option<String>,
    pub quantity_kg: Decimal,
    pub price_per_kg: Decimal,
    pub subtotal_amount: Decimal,
    pub tax_amount: Decimal,
    pub payable_amount: Decimal,
    pub quality_details: QualityDetails,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Quality audit payload stored with every purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityDetails {
    pub measurement: MeasurementInput,
    pub deductions: Vec<Deduction>,
}
