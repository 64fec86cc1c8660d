//! Point-of-sale service

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory::InventoryService;
use shared::{MovementType, SaleDetail, SaleItem, SaleTransaction};

/// Sale service for counter transactions
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Database row for a sale
#[derive(Debug, FromRow)]
struct SaleRow {
    id: Uuid,
    code: String,
    shelter_id: Uuid,
    cashier: Option<String>,
    total_amount: Decimal,
    amount_paid: Decimal,
    change_given: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<SaleRow> for SaleTransaction {
    fn from(row: SaleRow) -> Self {
        SaleTransaction {
            id: row.id,
            code: row.code,
            shelter_id: row.shelter_id,
            cashier: row.cashier,
            total_amount: row.total_amount,
            amount_paid: row.amount_paid,
            change_given: row.change_given,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Database row for a sale item
#[derive(Debug, FromRow)]
struct SaleItemRow {
    id: Uuid,
    sale_id: Uuid,
    product_id: Uuid,
    quantity: Decimal,
    unit_price: Decimal,
    subtotal: Decimal,
}

impl From<SaleItemRow> for SaleItem {
    fn from(row: SaleItemRow) -> Self {
        SaleItem {
            id: row.id,
            sale_id: row.sale_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: row.subtotal,
        }
    }
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
pub struct CreateSaleInput {
    pub shelter_id: Uuid,
    pub cashier: Option<String>,
    pub items: Vec<CreateSaleItem>,
    pub amount_paid: Decimal,
    pub notes: Option<String>,
}

/// One line of a sale being created
#[derive(Debug, Deserialize)]
pub struct CreateSaleItem {
    pub product_id: Uuid,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a sale, its items, and the matching stock movements
    pub async fn create_sale(&self, input: CreateSaleInput) -> AppResult<SaleDetail> {
        if input.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "A sale requires at least one item".to_string(),
                message_id: "Penjualan harus memiliki minimal satu barang".to_string(),
            });
        }

        for item in &input.items {
            if item.quantity <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "quantity".to_string(),
                    message: "Item quantity must be positive".to_string(),
                    message_id: "Jumlah barang harus lebih dari nol".to_string(),
                });
            }
            if item.unit_price <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "unit_price".to_string(),
                    message: "Item price must be positive".to_string(),
                    message_id: "Harga barang harus lebih dari nol".to_string(),
                });
            }

            let available =
                InventoryService::balance_for(&self.db, input.shelter_id, item.product_id).await?;
            if available < item.quantity {
                return Err(AppError::InsufficientStock(format!(
                    "Product {} has {} kg in stock, {} requested",
                    item.product_id, available, item.quantity
                )));
            }
        }

        let total_amount: Decimal = input
            .items
            .iter()
            .map(|item| item.quantity * item.unit_price)
            .sum();

        if input.amount_paid < total_amount {
            return Err(AppError::Validation {
                field: "amount_paid".to_string(),
                message: "Amount paid is less than the sale total".to_string(),
                message_id: "Jumlah bayar kurang dari total penjualan".to_string(),
            });
        }
        let change_given = input.amount_paid - total_amount;

        let code = self.generate_sale_code().await?;

        let mut tx = self.db.begin().await?;

        let sale_row = sqlx::query_as::<_, SaleRow>(
            r#"
            INSERT INTO sales (code, shelter_id, cashier, total_amount, amount_paid, change_given, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, code, shelter_id, cashier, total_amount, amount_paid, change_given, notes, created_at
            "#,
        )
        .bind(&code)
        .bind(input.shelter_id)
        .bind(&input.cashier)
        .bind(total_amount)
        .bind(input.amount_paid)
        .bind(change_given)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let subtotal = item.quantity * item.unit_price;

            let item_row = sqlx::query_as::<_, SaleItemRow>(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price, subtotal)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, sale_id, product_id, quantity, unit_price, subtotal
                "#,
            )
            .bind(sale_row.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(subtotal)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                r#"
                INSERT INTO stock_movements (shelter_id, product_id, movement_type, quantity_kg, reference_id)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(input.shelter_id)
            .bind(item.product_id)
            .bind(MovementType::SaleOut.as_str())
            .bind(item.quantity)
            .bind(sale_row.id)
            .execute(&mut *tx)
            .await?;

            items.push(item_row.into());
        }

        tx.commit().await?;

        tracing::info!(code = %code, total = %total_amount, "Sale recorded");

        Ok(SaleDetail {
            sale: sale_row.into(),
            items,
        })
    }

    /// Get a sale with its items
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<SaleDetail> {
        let sale_row = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, code, shelter_id, cashier, total_amount, amount_paid, change_given, notes, created_at
            FROM sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        let item_rows = sqlx::query_as::<_, SaleItemRow>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price, subtotal
            FROM sale_items
            WHERE sale_id = $1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(SaleDetail {
            sale: sale_row.into(),
            items: item_rows.into_iter().map(|r| r.into()).collect(),
        })
    }

    /// List all sales, newest first
    pub async fn list_sales(&self) -> AppResult<Vec<SaleTransaction>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, code, shelter_id, cashier, total_amount, amount_paid, change_given, notes, created_at
            FROM sales
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Generate unique sale code: PJ-YYYY-NNNN
    async fn generate_sale_code(&self) -> AppResult<String> {
        let year = Utc::now().year();

        let sequence: i32 = sqlx::query_scalar("SELECT get_next_code_sequence('PJ', $1)")
            .bind(year)
            .fetch_one(&self.db)
            .await?;

        Ok(format!("PJ-{}-{:04}", year, sequence))
    }
}
