//! Account Storage
//! Mission: Persist login identities with SQLite and bcrypt

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection, Row};
use tracing::info;
use uuid::Uuid;

use crate::auth::models::{Account, Role};
use crate::db;
use crate::error::ApiError;

/// Account storage with SQLite backend. Holds the path and opens a
/// connection per call.
pub struct AccountStore {
    db_path: String,
}

impl AccountStore {
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
            "CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                full_name TEXT,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    fn row_to_account(row: &Row) -> rusqlite::Result<Account> {
        let role_str: String = row.get(4)?;
        Ok(Account {
            id: db::uuid_column(0, row.get(0)?)?,
            email: row.get(1)?,
            full_name: row.get(2)?,
            password_hash: row.get(3)?,
            role: Role::from_str(&role_str).unwrap_or(Role::Patient),
            is_active: row.get(5)?,
            created_at: db::datetime_column(6, row.get(6)?)?,
        })
    }

    /// Create a new account. Email uniqueness is enforced both by a
    /// pre-check and by the UNIQUE constraint.
    pub fn create(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
        role: Role,
    ) -> Result<Account, ApiError> {
        if self.get_by_email(email)?.is_some() {
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash = hash(password, DEFAULT_COST)
            .map_err(|e| ApiError::Internal(e.into()))?;

        let account = Account {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            password_hash,
            role,
            is_active: true,
            created_at: Utc::now(),
        };

        let conn = Connection::open(&self.db_path)?;
        let result = conn.execute(
            "INSERT INTO accounts (id, email, full_name, password_hash, role, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                account.id.to_string(),
                account.email,
                account.full_name,
                account.password_hash,
                account.role.as_str(),
                account.is_active,
                account.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {}
            // Lost the race against a concurrent insert of the same email.
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(ApiError::DuplicateEmail);
            }
            Err(e) => return Err(e.into()),
        }

        info!("Created account: {} ({})", account.email, account.role.as_str());

        Ok(account)
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<Account>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, full_name, password_hash, role, is_active, created_at
             FROM accounts WHERE email = ?1",
        )?;

        match stmt.query_row(params![email], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn get_by_id(&self, id: &Uuid) -> Result<Option<Account>, ApiError> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, email, full_name, password_hash, role, is_active, created_at
             FROM accounts WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_account) {
            Ok(account) => Ok(Some(account)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify email + password, returning the account on success. `None`
    /// covers both unknown email and wrong password so callers cannot
    /// distinguish the two.
    pub fn verify_password(&self, email: &str, password: &str) -> Result<Option<Account>, ApiError> {
        let Some(account) = self.get_by_email(email)? else {
            return Ok(None);
        };

        let valid = verify(password, &account.password_hash)
            .map_err(|e| ApiError::Internal(e.into()))?;

        Ok(valid.then_some(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (AccountStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = AccountStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_retrieve_account() {
        let (store, _temp) = create_test_store();

        let created = store
            .create("p@example.com", "password123", None, Role::Patient)
            .unwrap();
        assert_eq!(created.role, Role::Patient);
        assert!(created.is_active);

        let by_email = store.get_by_email("p@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.get_by_id(&created.id).unwrap().unwrap();
        assert_eq!(by_id.email, "p@example.com");
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _temp) = create_test_store();

        store
            .create("p@example.com", "password123", None, Role::Patient)
            .unwrap();

        let result = store.create("p@example.com", "otherpass99", None, Role::Doctor);
        assert!(matches!(result, Err(ApiError::DuplicateEmail)));
    }

    #[test]
    fn test_password_verification() {
        let (store, _temp) = create_test_store();

        store
            .create("p@example.com", "password123", None, Role::Patient)
            .unwrap();

        assert!(store
            .verify_password("p@example.com", "password123")
            .unwrap()
            .is_some());
        assert!(store
            .verify_password("p@example.com", "wrongpassword")
            .unwrap()
            .is_none());
        assert!(store
            .verify_password("nobody@example.com", "password123")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_password_hash_is_not_plaintext() {
        let (store, _temp) = create_test_store();

        let account = store
            .create("p@example.com", "password123", None, Role::Patient)
            .unwrap();
        assert_ne!(account.password_hash, "password123");
        assert!(account.password_hash.starts_with("$2"));
    }
}
