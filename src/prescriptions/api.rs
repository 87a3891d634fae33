//! Prescription Endpoints

use axum::{extract::State, Json};

use crate::auth::middleware::AuthAccount;
use crate::error::ApiError;
use crate::prescriptions::models::PrescriptionView;
use crate::state::AppState;

/// GET /users/me/prescriptions
pub async fn list_my_prescriptions(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Result<Json<Vec<PrescriptionView>>, ApiError> {
    let prescriptions = state.prescriptions.list_for_patient(&account.id)?;

    Ok(Json(
        prescriptions
            .iter()
            .map(PrescriptionView::from_prescription)
            .collect(),
    ))
}
