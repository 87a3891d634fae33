//! Doctor Profile Storage
//! Mission: Persist profiles and run the verification state machine

use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::doctors::models::{DoctorProfile, VerificationStatus};
use crate::error::ApiError;

pub struct ProfileStore {
    db_path: String,
}

impl ProfileStore {
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
            "CREATE TABLE IF NOT EXISTS doctor_profiles (
                doctor_id TEXT PRIMARY KEY,
                full_name TEXT NOT NULL,
                specialty TEXT NOT NULL,
                bio TEXT,
                photo_url TEXT,
                degree_url TEXT,
                status TEXT NOT NULL DEFAULT 'pending'
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_profile(row: &Row) -> rusqlite::Result<DoctorProfile> {
        let status_str: String = row.get(6)?;
        Ok(DoctorProfile {
            doctor_id: db::uuid_column(0, row.get(0)?)?,
            full_name: row.get(1)?,
            specialty: row.get(2)?,
            bio: row.get(3)?,
            photo_url: row.get(4)?,
            degree_url: row.get(5)?,
            status: VerificationStatus::from_str(&status_str)
                .unwrap_or(VerificationStatus::Pending),
        })
    }

    const SELECT: &'static str =
        "SELECT doctor_id, full_name, specialty, bio, photo_url, degree_url, status
         FROM doctor_profiles";

    /// Insert a new profile. Registration always starts pending.
    pub fn create(&self, profile: &DoctorProfile) -> Result<(), ApiError> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "INSERT INTO doctor_profiles
                (doctor_id, full_name, specialty, bio, photo_url, degree_url, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                profile.doctor_id.to_string(),
                profile.full_name,
                profile.specialty,
                profile.bio,
                profile.photo_url,
                profile.degree_url,
                profile.status.as_str(),
            ],
        )?;

        info!("Created doctor profile: {}", profile.doctor_id);

        Ok(())
    }

    pub fn get(&self, doctor_id: &Uuid) -> Result<Option<DoctorProfile>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!("{} WHERE doctor_id = ?1", Self::SELECT))?;

        match stmt.query_row(params![doctor_id.to_string()], Self::row_to_profile) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_pending(&self) -> Result<Vec<DoctorProfile>, ApiError> {
        self.list_by_status(VerificationStatus::Pending)
    }

    pub fn list_verified(&self) -> Result<Vec<DoctorProfile>, ApiError> {
        self.list_by_status(VerificationStatus::Verified)
    }

    fn list_by_status(&self, status: VerificationStatus) -> Result<Vec<DoctorProfile>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!("{} WHERE status = ?1", Self::SELECT))?;

        let profiles = stmt
            .query_map(params![status.as_str()], Self::row_to_profile)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    pub fn get_verified(&self, doctor_id: &Uuid) -> Result<Option<DoctorProfile>, ApiError> {
        Ok(self
            .get(doctor_id)?
            .filter(|p| p.status == VerificationStatus::Verified))
    }

    /// Transition a pending profile to verified or rejected. The status
    /// check and write are a single conditional UPDATE, so two racing
    /// admins cannot both win.
    pub fn set_status(
        &self,
        doctor_id: &Uuid,
        new_status: VerificationStatus,
    ) -> Result<DoctorProfile, ApiError> {
        if self.get(doctor_id)?.is_none() {
            return Err(ApiError::NotFound("Doctor profile"));
        }

        let conn = Connection::open(&self.db_path)?;

        let rows = conn.execute(
            "UPDATE doctor_profiles SET status = ?1
             WHERE doctor_id = ?2 AND status = 'pending'",
            params![new_status.as_str(), doctor_id.to_string()],
        )?;

        if rows == 0 {
            return Err(ApiError::InvalidTransition(
                "Doctor profile has already been verified or rejected",
            ));
        }

        info!(
            "Doctor {} verification status set to {}",
            doctor_id,
            new_status.as_str()
        );

        // The update committed, so the profile is still there.
        self.get(doctor_id)?
            .ok_or(ApiError::NotFound("Doctor profile"))
    }
}
