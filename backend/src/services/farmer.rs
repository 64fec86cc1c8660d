//! Farmer registry service

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::{
    validate_indonesian_phone, validate_member_number, validate_nik, Farmer, PaginatedResponse,
    Pagination, PaginationMeta,
};

/// Farmer service for the member registry
#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Database row for a farmer
#[derive(Debug, FromRow)]
struct FarmerRow {
    id: Uuid,
    member_number: String,
    full_name: String,
    nik: String,
    phone: Option<String>,
    village: Option<String>,
    shelter_id: Option<Uuid>,
    active: bool,
    joined_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            member_number: row.member_number,
            full_name: row.full_name,
            nik: row.nik,
            phone: row.phone,
            village: row.village,
            shelter_id: row.shelter_id,
            active: row.active,
            joined_date: row.joined_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const FARMER_COLUMNS: &str = "id, member_number, full_name, nik, phone, village, shelter_id, \
     active, joined_date, created_at, updated_at";

/// Input for registering a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFarmerInput {
    pub member_number: String,
    #[validate(length(min = 1, max = 255))]
    pub full_name: String,
    pub nik: String,
    pub phone: Option<String>,
    pub village: Option<String>,
    pub shelter_id: Option<Uuid>,
    pub joined_date: Option<NaiveDate>,
}

/// Input for updating a farmer
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFarmerInput {
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub village: Option<String>,
    pub shelter_id: Option<Uuid>,
    pub active: Option<bool>,
}

impl FarmerService {
    /// Create a new FarmerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a farmer
    pub async fn create_farmer(&self, input: CreateFarmerInput) -> AppResult<Farmer> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Err(msg) = validate_member_number(&input.member_number) {
            return Err(AppError::Validation {
                field: "member_number".to_string(),
                message: msg.to_string(),
                message_id: "Nomor anggota tidak valid".to_string(),
            });
        }
        if let Err(msg) = validate_nik(&input.nik) {
            return Err(AppError::Validation {
                field: "nik".to_string(),
                message: msg.to_string(),
                message_id: "NIK tidak valid".to_string(),
            });
        }
        if let Some(phone) = &input.phone {
            if let Err(msg) = validate_indonesian_phone(phone) {
                return Err(AppError::Validation {
                    field: "phone".to_string(),
                    message: msg.to_string(),
                    message_id: "Nomor telepon tidak valid".to_string(),
                });
            }
        }

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM farmers WHERE member_number = $1 OR nik = $2",
        )
        .bind(&input.member_number)
        .bind(&input.nik)
        .fetch_optional(&self.db)
        .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateEntry("member_number".to_string()));
        }

        let joined_date = input.joined_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, FarmerRow>(&format!(
            r#"
            INSERT INTO farmers (member_number, full_name, nik, phone, village, shelter_id, joined_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FARMER_COLUMNS
        ))
        .bind(&input.member_number)
        .bind(&input.full_name)
        .bind(&input.nik)
        .bind(&input.phone)
        .bind(&input.village)
        .bind(input.shelter_id)
        .bind(joined_date)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a farmer by ID
    pub async fn get_farmer(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(&format!(
            "SELECT {} FROM farmers WHERE id = $1",
            FARMER_COLUMNS
        ))
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }

    /// List farmers, paginated, ordered by member number
    pub async fn list_farmers(
        &self,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Farmer>> {
        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM farmers")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, FarmerRow>(&format!(
            "SELECT {} FROM farmers ORDER BY member_number LIMIT $1 OFFSET $2",
            FARMER_COLUMNS
        ))
        .bind(pagination.per_page as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.db)
        .await?;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(|r| r.into()).collect(),
            pagination: PaginationMeta::new(&pagination, total_items as u64),
        })
    }

    /// Update a farmer
    pub async fn update_farmer(
        &self,
        farmer_id: Uuid,
        input: UpdateFarmerInput,
    ) -> AppResult<Farmer> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        if let Some(phone) = &input.phone {
            if let Err(msg) = validate_indonesian_phone(phone) {
                return Err(AppError::Validation {
                    field: "phone".to_string(),
                    message: msg.to_string(),
                    message_id: "Nomor telepon tidak valid".to_string(),
                });
            }
        }

        let row = sqlx::query_as::<_, FarmerRow>(&format!(
            r#"
            UPDATE farmers
            SET full_name = COALESCE($1, full_name),
                phone = COALESCE($2, phone),
                village = COALESCE($3, village),
                shelter_id = COALESCE($4, shelter_id),
                active = COALESCE($5, active),
                updated_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            FARMER_COLUMNS
        ))
        .bind(&input.full_name)
        .bind(&input.phone)
        .bind(&input.village)
        .bind(input.shelter_id)
        .bind(input.active)
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }
}
