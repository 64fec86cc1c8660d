//! Product catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{CommodityType, Product, ProductUnit};

/// Product service for commodity master data
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    sku: String,
    name: String,
    unit: String,
    reference_price: Option<Decimal>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let unit = ProductUnit::from_str(&row.unit)
            .ok_or_else(|| AppError::Internal(format!("Unknown product unit: {}", row.unit)))?;

        Ok(Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            unit,
            reference_price: row.reference_price,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PRODUCT_COLUMNS: &str = "id, sku, name, unit, reference_price, active, created_at, updated_at";

/// Product with its derived commodity classification
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    pub product: Product,
    pub commodity_type: CommodityType,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let commodity_type = product.commodity_type();
        ProductResponse {
            product,
            commodity_type,
        }
    }
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
    pub unit: ProductUnit,
    pub reference_price: Option<Decimal>,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub unit: Option<ProductUnit>,
    pub reference_price: Option<Decimal>,
    pub active: Option<bool>,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<ProductResponse> {
        if input.sku.trim().is_empty() {
            return Err(AppError::Validation {
                field: "sku".to_string(),
                message: "SKU is required".to_string(),
                message_id: "SKU harus diisi".to_string(),
            });
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name is required".to_string(),
                message_id: "Nama produk harus diisi".to_string(),
            });
        }
        if let Some(price) = input.reference_price {
            if price <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "reference_price".to_string(),
                    message: "Reference price must be positive".to_string(),
                    message_id: "Harga acuan harus lebih dari nol".to_string(),
                });
            }
        }

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM products WHERE sku = $1")
            .bind(&input.sku)
            .fetch_optional(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (sku, name, unit, reference_price)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&input.sku)
        .bind(&input.name)
        .bind(input.unit.as_str())
        .bind(input.reference_price)
        .fetch_one(&self.db)
        .await?;

        Ok(Product::try_from(row)?.into())
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: Uuid) -> AppResult<ProductResponse> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(Product::try_from(row)?.into())
    }

    /// List all products
    pub async fn list_products(&self) -> AppResult<Vec<ProductResponse>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY name",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|r| Product::try_from(r).map(ProductResponse::from))
            .collect()
    }

    /// Update a product
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<ProductResponse> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                unit = COALESCE($2, unit),
                reference_price = COALESCE($3, reference_price),
                active = COALESCE($4, active),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&input.name)
        .bind(input.unit.map(|u| u.as_str()))
        .bind(input.reference_price)
        .bind(input.active)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(Product::try_from(row)?.into())
    }
}
