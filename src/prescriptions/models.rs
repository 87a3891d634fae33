//! Prescription Models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prescription issued by a doctor for a patient. Read-only from the
/// API surface; writes happen at the store level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub notes: Option<String>,
    pub issued_date: NaiveDate,
}

/// Patient-facing view (issuer ids omitted, matching the public schema).
#[derive(Debug, Serialize)]
pub struct PrescriptionView {
    pub id: Uuid,
    pub medication: String,
    pub dosage: String,
    pub notes: Option<String>,
    pub issued_date: NaiveDate,
}

impl PrescriptionView {
    pub fn from_prescription(p: &Prescription) -> Self {
        Self {
            id: p.id,
            medication: p.medication.clone(),
            dosage: p.dosage.clone(),
            notes: p.notes.clone(),
            issued_date: p.issued_date,
        }
    }
}
