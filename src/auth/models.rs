//! Authentication Models
//! Mission: Define account, role, and token data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// Login identity shared by all roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Role gate used by every protected handler. Read-only check.
    pub fn require_role(&self, role: Role) -> Result<&Self, ApiError> {
        match self.role == role {
            true => Ok(self),
            false => Err(ApiError::Forbidden("Insufficient permissions")),
        }
    }

    /// Display name for listings: full name when set, email otherwise.
    pub fn display_name(&self) -> String {
        self.full_name.clone().unwrap_or_else(|| self.email.clone())
    }
}

/// Account roles for RBAC. Closed set; role is immutable after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "patient")]
    Patient,
    #[serde(rename = "doctor")]
    Doctor,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "patient" => Some(Role::Patient),
            "doctor" => Some(Role::Doctor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// JWT claims payload. The role is embedded next to the subject so
/// authorization never needs a second database lookup; role changes take
/// effect when the token expires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub role: Role,
    pub exp: usize, // expiration timestamp
}

/// Patient registration body.
#[derive(Debug, Deserialize)]
pub struct RegisterPatientRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Login form (OAuth2 password style: `username` carries the email).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: usize, // seconds until expiration
}

/// Account response (sanitized - no password hash).
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AccountResponse {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            role: account.role,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}
