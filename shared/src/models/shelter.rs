//! Shelter (collection point) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A collection point where commodity intake takes place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelter {
    pub id: Uuid,
    /// Short code used in reports (3-10 uppercase alphanumeric)
    pub code: String,
    pub name: String,
    pub village: Option<String>,
    pub created_at: DateTime<Utc>,
}
