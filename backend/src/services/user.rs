//! Staff user administration service
//!
//! Administration only; login and credentials live with the external
//! identity provider.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::{validate_indonesian_phone, User, UserRole};

/// User service for staff administration
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// Database row for a user
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    full_name: String,
    role: String,
    phone: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = UserRole::from_str(&row.role)
            .ok_or_else(|| AppError::Internal(format!("Unknown user role: {}", row.role)))?;

        Ok(User {
            id: row.id,
            username: row.username,
            full_name: row.full_name,
            role,
            phone: row.phone,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, full_name, role, phone, active, created_at, updated_at";

/// Input for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    pub username: String,
    pub full_name: String,
    pub role: UserRole,
    pub phone: Option<String>,
}

/// Input for updating a user
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a staff user
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        if input.username.trim().is_empty() {
            return Err(AppError::Validation {
                field: "username".to_string(),
                message: "Username is required".to_string(),
                message_id: "Nama pengguna harus diisi".to_string(),
            });
        }
        if input.full_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "full_name".to_string(),
                message: "Full name is required".to_string(),
                message_id: "Nama lengkap harus diisi".to_string(),
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

        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE username = $1")
            .bind(&input.username)
            .fetch_optional(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::DuplicateEntry("username".to_string()));
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, full_name, role, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&input.username)
        .bind(&input.full_name)
        .bind(input.role.as_str())
        .bind(&input.phone)
        .fetch_one(&self.db)
        .await?;

        row.try_into()
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.try_into()
    }

    /// List all users
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY username",
            USER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    /// Update a user
    pub async fn update_user(&self, user_id: Uuid, input: UpdateUserInput) -> AppResult<User> {
        if let Some(phone) = &input.phone {
            if let Err(msg) = validate_indonesian_phone(phone) {
                return Err(AppError::Validation {
                    field: "phone".to_string(),
                    message: msg.to_string(),
                    message_id: "Nomor telepon tidak valid".to_string(),
                });
            }
        }

        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET full_name = COALESCE($1, full_name),
                role = COALESCE($2, role),
                phone = COALESCE($3, phone),
                active = COALESCE($4, active),
                updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&input.full_name)
        .bind(input.role.map(|r| r.as_str()))
        .bind(&input.phone)
        .bind(input.active)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        row.try_into()
    }
}
