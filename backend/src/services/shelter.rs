//! Shelter (collection point) service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_shelter_code, Shelter};

/// Shelter service for collection points
#[derive(Clone)]
pub struct ShelterService {
    db: PgPool,
}

/// Database row for a shelter
#[derive(Debug, FromRow)]
struct ShelterRow {
    id: Uuid,
    code: String,
    name: String,
    village: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ShelterRow> for Shelter {
    fn from(row: ShelterRow) -> Self {
        Shelter {
            id: row.id,
            code: row.code,
            name: row.name,
            village: row.village,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a shelter
#[derive(Debug, Deserialize)]
pub struct CreateShelterInput {
    pub code: String,
    pub name: String,
    pub village: Option<String>,
}

impl ShelterService {
    /// Create a new ShelterService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a shelter
    pub async fn create_shelter(&self, input: CreateShelterInput) -> AppResult<Shelter> {
        if let Err(msg) = validate_shelter_code(&input.code) {
            return Err(AppError::Validation {
                field: "code".to_string(),
                message: msg.to_string(),
                message_id: "Kode tempat penampungan tidak valid".to_string(),
            });
        }
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Shelter name is required".to_string(),
                message_id: "Nama tempat penampungan harus diisi".to_string(),
            });
        }

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM shelters WHERE code = $1")
            .bind(&input.code)
            .fetch_optional(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateEntry("code".to_string()));
        }

        let row = sqlx::query_as::<_, ShelterRow>(
            r#"
            INSERT INTO shelters (code, name, village)
            VALUES ($1, $2, $3)
            RETURNING id, code, name, village, created_at
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.village)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Get a shelter by ID
    pub async fn get_shelter(&self, shelter_id: Uuid) -> AppResult<Shelter> {
        let row = sqlx::query_as::<_, ShelterRow>(
            "SELECT id, code, name, village, created_at FROM shelters WHERE id = $1",
        )
        .bind(shelter_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Shelter".to_string()))?;

        Ok(row.into())
    }

    /// List all shelters
    pub async fn list_shelters(&self) -> AppResult<Vec<Shelter>> {
        let rows = sqlx::query_as::<_, ShelterRow>(
            "SELECT id, code, name, village, created_at FROM shelters ORDER BY code",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}
