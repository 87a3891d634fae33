//! Application configuration
//! Mission: Collect environment-backed settings once at startup

use std::env;

/// Settings loaded from environment variables (`.env` supported via dotenv).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bind_addr: String,

    // Media upload collaborator (optional; uploads fail cleanly when unset)
    pub cloudinary_cloud_name: Option<String>,
    pub cloudinary_upload_preset: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let database_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "clinic.db".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production-minimum-32-characters".to_string());

        let token_ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(60);

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let cloudinary_cloud_name = env::var("CLOUDINARY_CLOUD_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let cloudinary_upload_preset = env::var("CLOUDINARY_UPLOAD_PRESET")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self {
            database_path,
            jwt_secret,
            token_ttl_minutes,
            bind_addr,
            cloudinary_cloud_name,
            cloudinary_upload_preset,
        }
    }
}
