//! Clinic Backend - Online Clinic API server

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_backend::{
    app,
    auth::JwtHandler,
    config::Config,
    media::{CloudinaryUploader, MediaUploader, UnconfiguredUploader},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    info!("Clinic backend starting");

    let jwt = Arc::new(JwtHandler::new(
        config.jwt_secret.clone(),
        config.token_ttl_minutes,
    ));

    let uploader: Arc<dyn MediaUploader> = match (
        config.cloudinary_cloud_name.clone(),
        config.cloudinary_upload_preset.clone(),
    ) {
        (Some(cloud_name), Some(upload_preset)) => {
            let http_client = reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .context("Failed to build HTTP client")?;
            info!("Media uploads configured (cloud: {cloud_name})");
            Arc::new(CloudinaryUploader::new(http_client, cloud_name, upload_preset))
        }
        _ => {
            warn!("CLOUDINARY_CLOUD_NAME / CLOUDINARY_UPLOAD_PRESET not set - uploads disabled");
            Arc::new(UnconfiguredUploader)
        }
    };

    let state = AppState::new(&config.database_path, jwt, uploader)
        .map_err(|e| anyhow::anyhow!("Failed to initialize stores: {e}"))?;

    info!("Database initialized at: {}", config.database_path);

    let router = app(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("API server listening on {}", config.bind_addr);

    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
