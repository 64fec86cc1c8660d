//! Farmer registry models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered cooperative member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Farmer {
    pub id: Uuid,
    /// Member number assigned by the cooperative, unique per member
    pub member_number: String,
    pub full_name: String,
    /// 16-digit national identity number (NIK)
    pub nik: String,
    pub phone: Option<String>,
    pub village: Option<String>,
    /// Shelter where the member usually delivers
    pub shelter_id: Option<Uuid>,
    pub active: bool,
    pub joined_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
