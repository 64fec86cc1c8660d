//! Purchase intake service
//!
//! Wraps the grading engine with the submission gate: preconditions are
//! checked before grading, a rejected verdict blocks persistence
//! unconditionally, and an accepted result is written as one transaction
//! record together with its stock movement.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{
    grade, validate_gross_weight, validate_purchase_price, CommodityType, DateRange,
    GradingResult, MeasurementInput, MovementType, PurchaseTransaction, QualityDetails,
};

/// Purchase service for commodity intake transactions
#[derive(Clone)]
pub struct PurchaseService {
    db: PgPool,
}

/// Database row for a purchase
#[derive(Debug, FromRow)]
struct PurchaseRow {
    id: Uuid,
    code: String,
    farmer_id: Uuid,
    shelter_id: Uuid,
    product_id: Uuid,
    commodity_type: String,
    purchase_date: NaiveDate,
    ims_officer: Option<String>,
    quantity_kg: Decimal,
    price_per_kg: Decimal,
    subtotal_amount: Decimal,
    tax_amount: Decimal,
    payable_amount: Decimal,
    quality_details: serde_json::Value,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for PurchaseTransaction {
    type Error = AppError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let commodity_type = CommodityType::from_str(&row.commodity_type)
            .ok_or_else(|| AppError::Internal(format!("Unknown commodity type: {}", row.commodity_type)))?;
        let quality_details: QualityDetails = serde_json::from_value(row.quality_details)
            .map_err(|e| AppError::Internal(format!("Corrupt quality payload: {}", e)))?;

        Ok(PurchaseTransaction {
            id: row.id,
            code: row.code,
            farmer_id: row.farmer_id,
            shelter_id: row.shelter_id,
            product_id: row.product_id,
            commodity_type,
            purchase_date: row.purchase_date,
            ims_officer: row.ims_officer,
            quantity_kg: row.quantity_kg,
            price_per_kg: row.price_per_kg,
            subtotal_amount: row.subtotal_amount,
            tax_amount: row.tax_amount,
            payable_amount: row.payable_amount,
            quality_details,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

const PURCHASE_COLUMNS: &str = "id, code, farmer_id, shelter_id, product_id, commodity_type, \
     purchase_date, ims_officer, quantity_kg, price_per_kg, subtotal_amount, tax_amount, \
     payable_amount, quality_details, notes, created_at";

/// Raw measurement fields as entered on the intake form
///
/// Absent fields deserialize to zero, matching the engine's zero-default
/// policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasurementFields {
    #[serde(default)]
    pub gross_weight_kg: Decimal,
    #[serde(default)]
    pub sack_count: Decimal,
    #[serde(default)]
    pub sack_unit_weight_kg: Decimal,
    #[serde(default)]
    pub brix_level: Decimal,
    #[serde(default)]
    pub waste_percent: Decimal,
    #[serde(default)]
    pub moisture_percent: Decimal,
    #[serde(default)]
    pub fungus_percent: Decimal,
    #[serde(default)]
    pub defects_percent: Decimal,
    #[serde(default)]
    pub bean_count: Decimal,
    #[serde(default)]
    pub container_weight_kg: Decimal,
    #[serde(default)]
    pub price_per_kg: Decimal,
}

impl MeasurementFields {
    fn to_measurement(&self, commodity_type: CommodityType) -> MeasurementInput {
        MeasurementInput {
            commodity_type,
            gross_weight_kg: self.gross_weight_kg,
            sack_count: self.sack_count,
            sack_unit_weight_kg: self.sack_unit_weight_kg,
            brix_level: self.brix_level,
            waste_percent: self.waste_percent,
            moisture_percent: self.moisture_percent,
            fungus_percent: self.fungus_percent,
            defects_percent: self.defects_percent,
            bean_count: self.bean_count,
            container_weight_kg: self.container_weight_kg,
            price_per_kg: self.price_per_kg,
        }
    }
}

/// Input for creating a purchase
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseInput {
    pub farmer_id: Option<Uuid>,
    pub shelter_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub purchase_date: Option<NaiveDate>,
    pub ims_officer: Option<String>,
    #[serde(flatten)]
    pub measurements: MeasurementFields,
    pub notes: Option<String>,
}

/// Input for previewing a grading result while the form is being filled
#[derive(Debug, Deserialize)]
pub struct PreviewPurchaseInput {
    pub product_id: Uuid,
    #[serde(flatten)]
    pub measurements: MeasurementFields,
}

/// Grading preview returned to the intake form
#[derive(Debug, Serialize)]
pub struct PurchasePreview {
    pub commodity_type: CommodityType,
    pub result: GradingResult,
    /// Deduction log rendered for display
    pub deduction_log: Vec<String>,
}

impl PurchaseService {
    /// Create a new PurchaseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Grade the current form state without persisting anything
    ///
    /// Mirrors the live recompute on the intake form; submission
    /// preconditions are deliberately not enforced here.
    pub async fn preview_purchase(&self, input: PreviewPurchaseInput) -> AppResult<PurchasePreview> {
        let product_name = self.fetch_product_name(input.product_id).await?;
        let commodity_type = CommodityType::from_product_name(&product_name);
        let result = grade(&input.measurements.to_measurement(commodity_type));
        let deduction_log = result.deduction_log();

        Ok(PurchasePreview {
            commodity_type,
            result,
            deduction_log,
        })
    }

    /// Record a purchase after re-running the grading engine server-side
    pub async fn create_purchase(&self, input: CreatePurchaseInput) -> AppResult<PurchaseTransaction> {
        let farmer_id = input.farmer_id.ok_or_else(|| AppError::Validation {
            field: "farmer_id".to_string(),
            message: "Farmer is required".to_string(),
            message_id: "Petani harus dipilih".to_string(),
        })?;
        let shelter_id = input.shelter_id.ok_or_else(|| AppError::Validation {
            field: "shelter_id".to_string(),
            message: "Shelter is required".to_string(),
            message_id: "Tempat penampungan harus dipilih".to_string(),
        })?;
        let product_id = input.product_id.ok_or_else(|| AppError::Validation {
            field: "product_id".to_string(),
            message: "Product is required".to_string(),
            message_id: "Produk harus dipilih".to_string(),
        })?;

        if validate_purchase_price(input.measurements.price_per_kg).is_err() {
            return Err(AppError::Validation {
                field: "price_per_kg".to_string(),
                message: "Price per kg must be positive".to_string(),
                message_id: "Harga per kg harus lebih dari nol".to_string(),
            });
        }
        if validate_gross_weight(input.measurements.gross_weight_kg).is_err() {
            return Err(AppError::Validation {
                field: "gross_weight_kg".to_string(),
                message: "Gross weight must be positive".to_string(),
                message_id: "Berat bruto harus lebih dari nol".to_string(),
            });
        }

        self.validate_farmer(farmer_id).await?;
        self.validate_shelter(shelter_id).await?;
        let product_name = self.fetch_product_name(product_id).await?;

        // Classification happens once at this boundary; the engine only
        // sees the resolved commodity tag.
        let commodity_type = CommodityType::from_product_name(&product_name);
        let measurement = input.measurements.to_measurement(commodity_type);
        let result = grade(&measurement);

        // A rejected verdict blocks persistence; there is no override path.
        if let Some(reason) = result.rejection {
            return Err(AppError::PurchaseRejected { reason });
        }

        let code = self.generate_purchase_code().await?;
        let purchase_date = input
            .purchase_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let quality_details = QualityDetails {
            measurement,
            deductions: result.deductions.clone(),
        };
        let quality_json = serde_json::to_value(&quality_details)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, PurchaseRow>(&format!(
            r#"
            INSERT INTO purchases (
                code, farmer_id, shelter_id, product_id, commodity_type,
                purchase_date, ims_officer, quantity_kg, price_per_kg,
                subtotal_amount, tax_amount, payable_amount, quality_details, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(&code)
        .bind(farmer_id)
        .bind(shelter_id)
        .bind(product_id)
        .bind(commodity_type.as_str())
        .bind(purchase_date)
        .bind(&input.ims_officer)
        .bind(result.net_weight_kg)
        .bind(input.measurements.price_per_kg)
        .bind(result.subtotal_amount)
        .bind(result.tax_amount)
        .bind(result.payable_amount)
        .bind(&quality_json)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_movements (shelter_id, product_id, movement_type, quantity_kg, reference_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(shelter_id)
        .bind(product_id)
        .bind(MovementType::PurchaseIn.as_str())
        .bind(result.net_weight_kg)
        .bind(row.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(code = %code, net_kg = %result.net_weight_kg, "Purchase recorded");

        row.try_into()
    }

    /// Get a purchase by ID
    pub async fn get_purchase(&self, purchase_id: Uuid) -> AppResult<PurchaseTransaction> {
        let row = sqlx::query_as::<_, PurchaseRow>(&format!(
            "SELECT {} FROM purchases WHERE id = $1",
            PURCHASE_COLUMNS
        ))
        .bind(purchase_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase".to_string()))?;

        row.try_into()
    }

    /// List purchases, optionally restricted to a date range
    pub async fn list_purchases(
        &self,
        range: Option<DateRange>,
    ) -> AppResult<Vec<PurchaseTransaction>> {
        let rows = match range {
            Some(range) => {
                sqlx::query_as::<_, PurchaseRow>(&format!(
                    r#"
                    SELECT {}
                    FROM purchases
                    WHERE purchase_date BETWEEN $1 AND $2
                    ORDER BY purchase_date DESC, created_at DESC
                    "#,
                    PURCHASE_COLUMNS
                ))
                .bind(range.start)
                .bind(range.end)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, PurchaseRow>(&format!(
                    "SELECT {} FROM purchases ORDER BY purchase_date DESC, created_at DESC",
                    PURCHASE_COLUMNS
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Generate unique purchase code: PB-YYYY-NNNN
    async fn generate_purchase_code(&self) -> AppResult<String> {
        let year = Utc::now().year();

        let sequence: i32 = sqlx::query_scalar("SELECT get_next_code_sequence('PB', $1)")
            .bind(year)
            .fetch_one(&self.db)
            .await?;

        Ok(format!("PB-{}-{:04}", year, sequence))
    }

    async fn validate_farmer(&self, farmer_id: Uuid) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM farmers WHERE id = $1 AND active = TRUE")
            .bind(farmer_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;
        Ok(())
    }

    async fn validate_shelter(&self, shelter_id: Uuid) -> AppResult<()> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM shelters WHERE id = $1")
            .bind(shelter_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Shelter".to_string()))?;
        Ok(())
    }

    async fn fetch_product_name(&self, product_id: Uuid) -> AppResult<String> {
        sqlx::query_scalar::<_, String>("SELECT name FROM products WHERE id = $1 AND active = TRUE")
            .bind(product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }
}
