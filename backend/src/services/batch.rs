//! Batch processing service
//!
//! A batch draws raw commodity from shelter stock when started and
//! restocks the processed product with its rendemen when completed.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;
use shared::{calculate_rendemen, BatchStatus, MovementType, ProcessingBatch};

/// Batch service for processing and traceability
#[derive(Clone)]
pub struct BatchService {
    db: PgPool,
}

/// Database row for a batch
#[derive(Debug, FromRow)]
struct BatchRow {
    id: Uuid,
    code: String,
    shelter_id: Uuid,
    input_product_id: Uuid,
    output_product_id: Uuid,
    input_quantity_kg: Decimal,
    output_quantity_kg: Option<Decimal>,
    rendemen_percent: Option<Decimal>,
    status: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BatchRow> for ProcessingBatch {
    type Error = AppError;

    fn try_from(row: BatchRow) -> Result<Self, Self::Error> {
        let status = BatchStatus::from_str(&row.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown batch status: {}", row.status)))?;

        Ok(ProcessingBatch {
            id: row.id,
            code: row.code,
            shelter_id: row.shelter_id,
            input_product_id: row.input_product_id,
            output_product_id: row.output_product_id,
            input_quantity_kg: row.input_quantity_kg,
            output_quantity_kg: row.output_quantity_kg,
            rendemen_percent: row.rendemen_percent,
            status,
            start_date: row.start_date,
            end_date: row.end_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const BATCH_COLUMNS: &str = "id, code, shelter_id, input_product_id, output_product_id, \
     input_quantity_kg, output_quantity_kg, rendemen_percent, status, start_date, end_date, \
     notes, created_at, updated_at";

/// Input for starting a batch
#[derive(Debug, Deserialize)]
pub struct CreateBatchInput {
    pub shelter_id: Uuid,
    pub input_product_id: Uuid,
    pub output_product_id: Uuid,
    pub input_quantity_kg: Decimal,
    pub start_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Input for completing a batch
#[derive(Debug, Deserialize)]
pub struct CompleteBatchInput {
    pub output_quantity_kg: Decimal,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Start a processing batch, drawing input stock from the shelter
    pub async fn create_batch(&self, input: CreateBatchInput) -> AppResult<ProcessingBatch> {
        if input.input_quantity_kg <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "input_quantity_kg".to_string(),
                message: "Input quantity must be positive".to_string(),
                message_id: "Jumlah bahan baku harus lebih dari nol".to_string(),
            });
        }
        if input.input_product_id == input.output_product_id {
            return Err(AppError::Validation {
                field: "output_product_id".to_string(),
                message: "Output product must differ from input product".to_string(),
                message_id: "Produk hasil harus berbeda dari bahan baku".to_string(),
            });
        }

        self.validate_product(input.input_product_id).await?;
        self.validate_product(input.output_product_id).await?;

        let available =
            InventoryService::balance_for(&self.db, input.shelter_id, input.input_product_id)
                .await?;
        if available < input.input_quantity_kg {
            return Err(AppError::InsufficientStock(format!(
                "Requested {} kg but only {} kg available",
                input.input_quantity_kg, available
            )));
        }

        let code = self.generate_batch_code().await?;
        let start_date = input.start_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            INSERT INTO batches (
                code, shelter_id, input_product_id, output_product_id,
                input_quantity_kg, status, start_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            BATCH_COLUMNS
        ))
        .bind(&code)
        .bind(input.shelter_id)
        .bind(input.input_product_id)
        .bind(input.output_product_id)
        .bind(input.input_quantity_kg)
        .bind(BatchStatus::InProgress.as_str())
        .bind(start_date)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_movements (shelter_id, product_id, movement_type, quantity_kg, reference_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(input.shelter_id)
        .bind(input.input_product_id)
        .bind(MovementType::BatchOut.as_str())
        .bind(input.input_quantity_kg)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(code = %code, input_kg = %input.input_quantity_kg, "Batch started");

        row.try_into()
    }

    /// Complete a batch, computing rendemen and restocking the output
    pub async fn complete_batch(
        &self,
        batch_id: Uuid,
        input: CompleteBatchInput,
    ) -> AppResult<ProcessingBatch> {
        if input.output_quantity_kg <= Decimal::ZERO {
            return Err(AppError::Validation {
                field: "output_quantity_kg".to_string(),
                message: "Output quantity must be positive".to_string(),
                message_id: "Jumlah hasil harus lebih dari nol".to_string(),
            });
        }

        let batch = self.get_batch(batch_id).await?;
        if batch.status != BatchStatus::InProgress {
            return Err(AppError::InvalidStateTransition(format!(
                "Batch {} is already {}",
                batch.code,
                batch.status.as_str()
            )));
        }

        let rendemen = calculate_rendemen(batch.input_quantity_kg, input.output_quantity_kg);
        let end_date = input.end_date.unwrap_or_else(|| Utc::now().date_naive());

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BatchRow>(&format!(
            r#"
            UPDATE batches
            SET output_quantity_kg = $1, rendemen_percent = $2, status = $3,
                end_date = $4, notes = COALESCE($5, notes), updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            BATCH_COLUMNS
        ))
        .bind(input.output_quantity_kg)
        .bind(rendemen)
        .bind(BatchStatus::Completed.as_str())
        .bind(end_date)
        .bind(&input.notes)
        .bind(batch_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_movements (shelter_id, product_id, movement_type, quantity_kg, reference_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(batch.shelter_id)
        .bind(batch.output_product_id)
        .bind(MovementType::BatchIn.as_str())
        .bind(input.output_quantity_kg)
        .bind(batch_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(code = %batch.code, rendemen = %rendemen, "Batch completed");

        row.try_into()
    }

    /// Get a batch by ID
    pub async fn get_batch(&self, batch_id: Uuid) -> AppResult<ProcessingBatch> {
        let row = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {} FROM batches WHERE id = $1",
            BATCH_COLUMNS
        ))
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        row.try_into()
    }

    /// List all batches, newest first
    pub async fn list_batches(&self) -> AppResult<Vec<ProcessingBatch>> {
        let rows = sqlx::query_as::<_, BatchRow>(&format!(
            "SELECT {} FROM batches ORDER BY created_at DESC",
            BATCH_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Generate unique batch code: BT-YYYY-NNNN
    async fn generate_batch_code(&self) -> AppResult<String> {
        let year = Utc::now().year();

        let sequence: i32 = sqlx::query_scalar("SELECT get_next_code_sequence('BT', $1)")
            .bind(year)
            .fetch_one(&self.db)
            .await?;

        Ok(format!("BT-{}-{:04}", year, sequence))
    }

    async fn validate_product(&self, product_id: Uuid) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM products WHERE id = $1 AND active = TRUE")
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;
        Ok(())
    }
}
