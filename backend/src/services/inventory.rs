//! Inventory service for tracking stock movements and balances
//!
//! Purchases, batches, and sales write their own movements; this service
//! owns manual adjustments and the read side.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{InventorySummary, MovementType, StockBalance, StockMovement};

/// Inventory service for stock movements and balances
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Database row for a stock movement
#[derive(Debug, FromRow)]
struct MovementRow {
    id: Uuid,
    shelter_id: Uuid,
    product_id: Uuid,
    movement_type: String,
    quantity_kg: Decimal,
    reference_id: Option<Uuid>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MovementRow> for StockMovement {
    type Error = AppError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        let movement_type = MovementType::from_str(&row.movement_type)
            .ok_or_else(|| AppError::Internal(format!("Unknown movement type: {}", row.movement_type)))?;

        Ok(StockMovement {
            id: row.id,
            shelter_id: row.shelter_id,
            product_id: row.product_id,
            movement_type,
            quantity_kg: row.quantity_kg,
            reference_id: row.reference_id,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

/// Row for balance aggregation
#[derive(Debug, FromRow)]
struct BalanceRow {
    shelter_id: Uuid,
    product_id: Uuid,
    product_name: String,
    total_in: Decimal,
    total_out: Decimal,
    total_adjustment: Decimal,
}

impl From<BalanceRow> for StockBalance {
    fn from(row: BalanceRow) -> Self {
        StockBalance {
            shelter_id: row.shelter_id,
            product_id: row.product_id,
            product_name: row.product_name,
            balance_kg: row.total_in - row.total_out + row.total_adjustment,
            total_in_kg: row.total_in,
            total_out_kg: row.total_out,
        }
    }
}

/// Input for a manual stock adjustment
///
/// Quantity carries its sign: positive adds stock, negative removes it.
#[derive(Debug, Deserialize)]
pub struct RecordAdjustmentInput {
    pub shelter_id: Uuid,
    pub product_id: Uuid,
    pub quantity_kg: Decimal,
    pub notes: Option<String>,
}

/// Filters for listing movements
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    pub shelter_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

const BALANCE_QUERY: &str = r#"
    SELECT sm.shelter_id, sm.product_id, p.name AS product_name,
           COALESCE(SUM(sm.quantity_kg) FILTER (WHERE sm.movement_type IN ('purchase_in', 'batch_in')), 0) AS total_in,
           COALESCE(SUM(sm.quantity_kg) FILTER (WHERE sm.movement_type IN ('batch_out', 'sale_out')), 0) AS total_out,
           COALESCE(SUM(sm.quantity_kg) FILTER (WHERE sm.movement_type = 'adjustment'), 0) AS total_adjustment
    FROM stock_movements sm
    JOIN products p ON p.id = sm.product_id
"#;

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Current balance of one product at one shelter
    ///
    /// Associated function so the purchase, batch, and sale flows can
    /// check stock without constructing the service.
    pub async fn balance_for(
        db: &PgPool,
        shelter_id: Uuid,
        product_id: Uuid,
    ) -> AppResult<Decimal> {
        let row = sqlx::query_as::<_, BalanceRow>(&format!(
            "{} WHERE sm.shelter_id = $1 AND sm.product_id = $2 GROUP BY sm.shelter_id, sm.product_id, p.name",
            BALANCE_QUERY
        ))
        .bind(shelter_id)
        .bind(product_id)
        .fetch_optional(db)
        .await?;

        Ok(row
            .map(|r| StockBalance::from(r).balance_kg)
            .unwrap_or(Decimal::ZERO))
    }

    /// Record a manual stock adjustment
    pub async fn record_adjustment(
        &self,
        input: RecordAdjustmentInput,
    ) -> AppResult<StockMovement> {
        if input.quantity_kg.is_zero() {
            return Err(AppError::Validation {
                field: "quantity_kg".to_string(),
                message: "Adjustment quantity cannot be zero".to_string(),
                message_id: "Jumlah penyesuaian tidak boleh nol".to_string(),
            });
        }

        let row = sqlx::query_as::<_, MovementRow>(
            r#"
            INSERT INTO stock_movements (shelter_id, product_id, movement_type, quantity_kg, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, shelter_id, product_id, movement_type, quantity_kg, reference_id, notes, created_at
            "#,
        )
        .bind(input.shelter_id)
        .bind(input.product_id)
        .bind(MovementType::Adjustment.as_str())
        .bind(input.quantity_kg)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// List stock movements, newest first
    pub async fn list_movements(&self, filter: MovementFilter) -> AppResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT id, shelter_id, product_id, movement_type, quantity_kg, reference_id, notes, created_at
            FROM stock_movements
            WHERE ($1::uuid IS NULL OR shelter_id = $1)
              AND ($2::uuid IS NULL OR product_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.shelter_id)
        .bind(filter.product_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Stock balances per product and shelter
    pub async fn get_balances(&self) -> AppResult<Vec<StockBalance>> {
        let rows = sqlx::query_as::<_, BalanceRow>(&format!(
            "{} GROUP BY sm.shelter_id, sm.product_id, p.name ORDER BY p.name",
            BALANCE_QUERY
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(StockBalance::from).collect())
    }

    /// Inventory summary across all shelters
    pub async fn get_summary(&self) -> AppResult<InventorySummary> {
        let balances = self.get_balances().await?;
        let total_kg = balances.iter().map(|b| b.balance_kg).sum();

        Ok(InventorySummary {
            balances,
            total_kg,
            as_of: Utc::now(),
        })
    }
}
