//! Shared application state

use std::sync::Arc;

use crate::appointments::AppointmentStore;
use crate::auth::{AccountStore, JwtHandler};
use crate::doctors::ProfileStore;
use crate::error::ApiError;
use crate::media::MediaUploader;
use crate::prescriptions::PrescriptionStore;
use crate::reviews::ReviewStore;
use crate::signaling::SignalingRegistry;

/// Everything the handlers need, created once in `main` (or in a test
/// harness) and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountStore>,
    pub profiles: Arc<ProfileStore>,
    pub appointments: Arc<AppointmentStore>,
    pub prescriptions: Arc<PrescriptionStore>,
    pub reviews: Arc<ReviewStore>,
    pub jwt: Arc<JwtHandler>,
    pub uploader: Arc<dyn MediaUploader>,
    pub signaling: SignalingRegistry,
}

impl AppState {
    /// Wire all stores against one SQLite file.
    pub fn new(
        db_path: &str,
        jwt: Arc<JwtHandler>,
        uploader: Arc<dyn MediaUploader>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            accounts: Arc::new(AccountStore::new(db_path)?),
            profiles: Arc::new(ProfileStore::new(db_path)?),
            appointments: Arc::new(AppointmentStore::new(db_path)?),
            prescriptions: Arc::new(PrescriptionStore::new(db_path)?),
            reviews: Arc::new(ReviewStore::new(db_path)?),
            jwt,
            uploader,
            signaling: SignalingRegistry::new(128),
        })
    }
}
