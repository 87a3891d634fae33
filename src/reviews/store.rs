//! Review Storage

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::reviews::models::Review;

pub struct ReviewStore {
    db_path: String,
}

impl ReviewStore {
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
            "CREATE TABLE IF NOT EXISTS reviews (
                id TEXT PRIMARY KEY,
                doctor_id TEXT NOT NULL,
                patient_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_review(row: &Row) -> rusqlite::Result<Review> {
        Ok(Review {
            id: db::uuid_column(0, row.get(0)?)?,
            doctor_id: db::uuid_column(1, row.get(1)?)?,
            patient_id: db::uuid_column(2, row.get(2)?)?,
            rating: row.get(3)?,
            comment: row.get(4)?,
            created_at: db::datetime_column(5, row.get(5)?)?,
        })
    }

    pub fn create(
        &self,
        doctor_id: Uuid,
        patient_id: Uuid,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<Review, ApiError> {
        let review = Review {
            id: Uuid::new_v4(),
            doctor_id,
            patient_id,
            rating,
            comment: comment.map(str::to_string),
            created_at: Utc::now(),
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO reviews (id, doctor_id, patient_id, rating, comment, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                review.id.to_string(),
                review.doctor_id.to_string(),
                review.patient_id.to_string(),
                review.rating,
                review.comment,
                review.created_at.to_rfc3339(),
            ],
        )?;

        Ok(review)
    }

    pub fn list_for_doctor(&self, doctor_id: &Uuid) -> Result<Vec<Review>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, doctor_id, patient_id, rating, comment, created_at
             FROM reviews WHERE doctor_id = ?1 ORDER BY created_at DESC",
        )?;

        let reviews = stmt
            .query_map(params![doctor_id.to_string()], Self::row_to_review)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_and_list_for_doctor() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ReviewStore::new(temp_file.path().to_str().unwrap()).unwrap();

        let doctor = Uuid::new_v4();
        store
            .create(doctor, Uuid::new_v4(), 5, Some("Great doctor"))
            .unwrap();
        store.create(doctor, Uuid::new_v4(), 3, None).unwrap();
        store.create(Uuid::new_v4(), Uuid::new_v4(), 1, None).unwrap();

        let reviews = store.list_for_doctor(&doctor).unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews.iter().all(|r| r.doctor_id == doctor));
    }
}
