//! Prescription Storage

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::prescriptions::models::Prescription;

pub struct PrescriptionStore {
    db_path: String,
}

impl PrescriptionStore {
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), ApiError> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS prescriptions (
                id TEXT PRIMARY KEY,
                patient_id TEXT NOT NULL,
                doctor_id TEXT NOT NULL,
                medication TEXT NOT NULL,
                dosage TEXT NOT NULL,
                notes TEXT,
                issued_date TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_prescription(row: &Row) -> rusqlite::Result<Prescription> {
        Ok(Prescription {
            id: db::uuid_column(0, row.get(0)?)?,
            patient_id: db::uuid_column(1, row.get(1)?)?,
            doctor_id: db::uuid_column(2, row.get(2)?)?,
            medication: row.get(3)?,
            dosage: row.get(4)?,
            notes: row.get(5)?,
            issued_date: db::date_column(6, row.get(6)?)?,
        })
    }

    /// Issue a prescription. Used by the issuing seam and by tests; there
    /// is no write endpoint in the covered API surface.
    pub fn create(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        medication: &str,
        dosage: &str,
        notes: Option<&str>,
    ) -> Result<Prescription, ApiError> {
        let prescription = Prescription {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            medication: medication.to_string(),
            dosage: dosage.to_string(),
            notes: notes.map(str::to_string),
            issued_date: Utc::now().date_naive(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO prescriptions
                (id, patient_id, doctor_id, medication, dosage, notes, issued_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                prescription.id.to_string(),
                prescription.patient_id.to_string(),
                prescription.doctor_id.to_string(),
                prescription.medication,
                prescription.dosage,
                prescription.notes,
                prescription.issued_date.to_string(),
            ],
        )?;

        Ok(prescription)
    }

    pub fn list_for_patient(&self, patient_id: &Uuid) -> Result<Vec<Prescription>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, patient_id, doctor_id, medication, dosage, notes, issued_date
             FROM prescriptions WHERE patient_id = ?1 ORDER BY issued_date DESC",
        )?;

        let prescriptions = stmt
            .query_map(params![patient_id.to_string()], Self::row_to_prescription)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(prescriptions)
    }
}
