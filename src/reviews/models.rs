//! Review Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient-authored review of a doctor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub rating: i64, // 1..=5
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review submission body. The rating bound is checked at the handler.
#[derive(Debug, Deserialize)]
pub struct ReviewCreate {
    pub rating: i64,
    pub comment: Option<String>,
}
