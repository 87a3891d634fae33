//! Appointment Storage
//! Mission: Persist bookings and run the lifecycle state machine

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

use crate::appointments::models::{Appointment, AppointmentStatus, ContactInfo};
use crate::db;
use crate::error::ApiError;

pub struct AppointmentStore {
    db_path: String,
}

impl AppointmentStore {
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), ApiError> {
        let conn = Connection::open(&self.db_path)?;

        // No uniqueness on (doctor_id, appointment_date, appointment_time):
        // double booking is an accepted non-guarantee of this system.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS appointments (
                id TEXT PRIMARY KEY,
                patient_id TEXT NOT NULL,
                doctor_id TEXT NOT NULL,
                appointment_date TEXT NOT NULL,
                appointment_time TEXT NOT NULL,
                reason TEXT NOT NULL,
                notes TEXT,
                contact_name TEXT,
                contact_email TEXT,
                contact_phone TEXT,
                contact_address TEXT,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    const SELECT: &'static str = "SELECT id, patient_id, doctor_id, appointment_date,
        appointment_time, reason, notes, contact_name, contact_email, contact_phone,
        contact_address, status, created_at, updated_at FROM appointments";

    fn row_to_appointment(row: &Row) -> rusqlite::Result<Appointment> {
        let status_str: String = row.get(11)?;

        let contact = ContactInfo {
            name: row.get(7)?,
            email: row.get(8)?,
            phone: row.get(9)?,
            address: row.get(10)?,
        };

        Ok(Appointment {
            id: db::uuid_column(0, row.get(0)?)?,
            patient_id: db::uuid_column(1, row.get(1)?)?,
            doctor_id: db::uuid_column(2, row.get(2)?)?,
            date: db::date_column(3, row.get(3)?)?,
            time: row.get(4)?,
            reason: row.get(5)?,
            notes: row.get(6)?,
            contact: (!contact.is_empty()).then_some(contact),
            status: AppointmentStatus::from_str(&status_str)
                .unwrap_or(AppointmentStatus::Pending),
            created_at: db::datetime_column(12, row.get(12)?)?,
            updated_at: db::datetime_column(13, row.get(13)?)?,
        })
    }

    /// Book an appointment. Always created pending.
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        &self,
        patient_id: Uuid,
        doctor_id: Uuid,
        date: NaiveDate,
        time: &str,
        reason: &str,
        notes: Option<&str>,
        contact: Option<ContactInfo>,
    ) -> Result<Appointment, ApiError> {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date,
            time: time.to_string(),
            reason: reason.to_string(),
            notes: notes.map(str::to_string),
            contact,
            status: AppointmentStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let contact = appointment.contact.clone().unwrap_or_default();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, appointment_date,
                appointment_time, reason, notes, contact_name, contact_email,
                contact_phone, contact_address, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                appointment.id.to_string(),
                appointment.patient_id.to_string(),
                appointment.doctor_id.to_string(),
                appointment.date.to_string(),
                appointment.time,
                appointment.reason,
                appointment.notes,
                contact.name,
                contact.email,
                contact.phone,
                contact.address,
                appointment.status.as_str(),
                appointment.created_at.to_rfc3339(),
                appointment.updated_at.to_rfc3339(),
            ],
        )?;

        info!(
            "Appointment booked: {} (patient {} -> doctor {})",
            appointment.id, patient_id, doctor_id
        );

        Ok(appointment)
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Appointment>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", Self::SELECT))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_appointment) {
            Ok(appointment) => Ok(Some(appointment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_for_patient(
        &self,
        patient_id: &Uuid,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.list_by_owner("patient_id", patient_id, include_cancelled)
    }

    pub fn list_for_doctor(
        &self,
        doctor_id: &Uuid,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>, ApiError> {
        self.list_by_owner("doctor_id", doctor_id, include_cancelled)
    }

    fn list_by_owner(
        &self,
        column: &str,
        owner: &Uuid,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let filter = if include_cancelled {
            ""
        } else {
            " AND status != 'cancelled'"
        };
        let mut stmt = conn.prepare(&format!(
            "{} WHERE {column} = ?1{filter} ORDER BY appointment_date, appointment_time",
            Self::SELECT
        ))?;

        let appointments = stmt
            .query_map(params![owner.to_string()], Self::row_to_appointment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(appointments)
    }

    /// Doctor-side transition: pending -> confirmed | cancelled.
    ///
    /// The pending check and the write are one conditional UPDATE, so two
    /// racing calls cannot both succeed.
    pub fn update_status(
        &self,
        id: &Uuid,
        actor_doctor_id: &Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let appointment = self.get(id)?.ok_or(ApiError::NotFound("Appointment"))?;

        if appointment.doctor_id != *actor_doctor_id {
            return Err(ApiError::Forbidden(
                "You can only manage your own appointments",
            ));
        }

        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "UPDATE appointments SET status = ?1, updated_at = ?2
             WHERE id = ?3 AND doctor_id = ?4 AND status = 'pending'",
            params![
                new_status.as_str(),
                Utc::now().to_rfc3339(),
                id.to_string(),
                actor_doctor_id.to_string(),
            ],
        )?;

        if rows == 0 {
            return Err(ApiError::InvalidTransition(
                "Only a pending appointment can be confirmed or cancelled",
            ));
        }

        info!("Appointment {} -> {}", id, new_status.as_str());

        self.get(id)?.ok_or(ApiError::NotFound("Appointment"))
    }

    /// Patient-side removal of a still-pending appointment. Permanent.
    pub fn delete(&self, id: &Uuid, actor_patient_id: &Uuid) -> Result<(), ApiError> {
        let appointment = self.get(id)?.ok_or(ApiError::NotFound("Appointment"))?;

        if appointment.patient_id != *actor_patient_id {
            return Err(ApiError::Forbidden(
                "You can only delete your own appointments",
            ));
        }

        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "DELETE FROM appointments
             WHERE id = ?1 AND patient_id = ?2 AND status = 'pending'",
            params![id.to_string(), actor_patient_id.to_string()],
        )?;

        if rows == 0 {
            return Err(ApiError::InvalidTransition(
                "Only a pending appointment can be deleted",
            ));
        }

        info!("Appointment deleted: {}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (AppointmentStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = AppointmentStore::new(db_path).unwrap();
        (store, temp_file)
    }

    fn book(store: &AppointmentStore, patient: Uuid, doctor: Uuid) -> Appointment {
        store
            .create(
                patient,
                doctor,
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                "10:00",
                "Checkup",
                None,
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_create_defaults_to_pending() {
        let (store, _temp) = create_test_store();
        let appointment = book(&store, Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(appointment.status, AppointmentStatus::Pending);

        let loaded = store.get(&appointment.id).unwrap().unwrap();
        assert_eq!(loaded.status, AppointmentStatus::Pending);
        assert_eq!(loaded.time, "10:00");
    }

    #[test]
    fn test_double_booking_is_not_prevented() {
        // Accepted non-guarantee: same doctor, date, and slot may be
        // booked twice.
        let (store, _temp) = create_test_store();
        let doctor = Uuid::new_v4();

        book(&store, Uuid::new_v4(), doctor);
        book(&store, Uuid::new_v4(), doctor);

        assert_eq!(store.list_for_doctor(&doctor, true).unwrap().len(), 2);
    }

    #[test]
    fn test_confirm_then_confirm_again_fails() {
        let (store, _temp) = create_test_store();
        let doctor = Uuid::new_v4();
        let appointment = book(&store, Uuid::new_v4(), doctor);

        let updated = store
            .update_status(&appointment.id, &doctor, AppointmentStatus::Confirmed)
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);

        let result = store.update_status(&appointment.id, &doctor, AppointmentStatus::Cancelled);
        assert!(matches!(result, Err(ApiError::InvalidTransition(_))));

        // Stored status unchanged by the failed attempt.
        assert_eq!(
            store.get(&appointment.id).unwrap().unwrap().status,
            AppointmentStatus::Confirmed
        );
    }

    #[test]
    fn test_update_status_ownership() {
        let (store, _temp) = create_test_store();
        let doctor = Uuid::new_v4();
        let appointment = book(&store, Uuid::new_v4(), doctor);

        let other_doctor = Uuid::new_v4();
        let result =
            store.update_status(&appointment.id, &other_doctor, AppointmentStatus::Confirmed);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        assert_eq!(
            store.get(&appointment.id).unwrap().unwrap().status,
            AppointmentStatus::Pending
        );
    }

    #[test]
    fn test_update_status_missing_appointment() {
        let (store, _temp) = create_test_store();

        let result =
            store.update_status(&Uuid::new_v4(), &Uuid::new_v4(), AppointmentStatus::Confirmed);
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_delete_rules() {
        let (store, _temp) = create_test_store();
        let patient = Uuid::new_v4();
        let doctor = Uuid::new_v4();
        let appointment = book(&store, patient, doctor);

        // Someone else's appointment.
        let result = store.delete(&appointment.id, &Uuid::new_v4());
        assert!(matches!(result, Err(ApiError::Forbidden(_))));

        // Own pending appointment: gone for good.
        store.delete(&appointment.id, &patient).unwrap();
        assert!(store.get(&appointment.id).unwrap().is_none());

        // Confirmed appointments cannot be deleted.
        let confirmed = book(&store, patient, doctor);
        store
            .update_status(&confirmed.id, &doctor, AppointmentStatus::Confirmed)
            .unwrap();
        let result = store.delete(&confirmed.id, &patient);
        assert!(matches!(result, Err(ApiError::InvalidTransition(_))));
        assert!(store.get(&confirmed.id).unwrap().is_some());
    }

    #[test]
    fn test_listing_filters_cancelled() {
        let (store, _temp) = create_test_store();
        let patient = Uuid::new_v4();
        let doctor = Uuid::new_v4();

        let kept = book(&store, patient, doctor);
        let cancelled = book(&store, patient, doctor);
        store
            .update_status(&cancelled.id, &doctor, AppointmentStatus::Cancelled)
            .unwrap();

        let all = store.list_for_patient(&patient, true).unwrap();
        assert_eq!(all.len(), 2);

        let active = store.list_for_patient(&patient, false).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);
    }

    #[test]
    fn test_contact_snapshot_round_trip() {
        let (store, _temp) = create_test_store();

        let contact = ContactInfo {
            name: Some("Pat Example".to_string()),
            email: Some("p@example.com".to_string()),
            phone: Some("555-0100".to_string()),
            address: None,
        };
        let appointment = store
            .create(
                Uuid::new_v4(),
                Uuid::new_v4(),
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                "10:00",
                "Checkup",
                Some("first visit"),
                Some(contact),
            )
            .unwrap();

        let loaded = store.get(&appointment.id).unwrap().unwrap();
        let contact = loaded.contact.unwrap();
        assert_eq!(contact.name.as_deref(), Some("Pat Example"));
        assert_eq!(contact.phone.as_deref(), Some("555-0100"));
        assert!(contact.address.is_none());
        assert_eq!(loaded.notes.as_deref(), Some("first visit"));
    }
}
