//! Processing batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A processing batch turning an input commodity into an output commodity
///
/// The batch draws its input quantity from shelter stock when started and
/// restocks the output product when completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingBatch {
    pub id: Uuid,
    /// Batch code, e.g. BT-2026-0007
    pub code: String,
    pub shelter_id: Uuid,
    pub input_product_id: Uuid,
    pub output_product_id: Uuid,
    pub input_quantity_kg: Decimal,
    pub output_quantity_kg: Option<Decimal>,
    /// Yield percent (output / input × 100), set on completion
    pub rendemen_percent: Option<Decimal>,
    pub status: BatchStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Batch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    InProgress,
    Completed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::InProgress => "in_progress",
            BatchStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "in_progress" => Some(BatchStatus::InProgress),
            "completed" => Some(BatchStatus::Completed),
            _ => None,
        }
    }
}

/// Calculate rendemen (yield percentage) of a completed batch
pub fn calculate_rendemen(input_kg: Decimal, output_kg: Decimal) -> Decimal {
    if input_kg.is_zero() {
        Decimal::ZERO
    } else {
        (output_kg / input_kg) * Decimal::from(100)
    }
}
