//! Doctor Endpoints
//! Mission: Admin verification workflow + public profile browsing

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthAccount;
use crate::auth::models::Role;
use crate::doctors::models::{DoctorAdminView, DoctorPublicView, VerificationStatus};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /admin/doctors/pending (admin only)
pub async fn list_pending_doctors(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
) -> Result<Json<Vec<DoctorAdminView>>, ApiError> {
    account.require_role(Role::Admin)?;

    let profiles = state.profiles.list_pending()?;

    let mut response = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let email = account_email(&state, &profile.doctor_id)?;
        response.push(DoctorAdminView::new(profile, email));
    }

    Ok(Json(response))
}

/// PATCH /admin/doctors/:id/verify (admin only)
pub async fn verify_doctor(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<DoctorAdminView>, ApiError> {
    set_status(state, account, doctor_id, VerificationStatus::Verified).await
}

/// PATCH /admin/doctors/:id/reject (admin only)
pub async fn reject_doctor(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<DoctorAdminView>, ApiError> {
    set_status(state, account, doctor_id, VerificationStatus::Rejected).await
}

async fn set_status(
    state: AppState,
    account: crate::auth::models::Account,
    doctor_id: Uuid,
    new_status: VerificationStatus,
) -> Result<Json<DoctorAdminView>, ApiError> {
    account.require_role(Role::Admin)?;

    let profile = state.profiles.set_status(&doctor_id, new_status)?;
    let email = account_email(&state, &doctor_id)?;

    Ok(Json(DoctorAdminView::new(profile, email)))
}

fn account_email(state: &AppState, doctor_id: &Uuid) -> Result<String, ApiError> {
    Ok(state
        .accounts
        .get_by_id(doctor_id)?
        .map(|a| a.email)
        .unwrap_or_else(|| "N/A".to_string()))
}

/// GET /doctors (public) - all verified profiles
pub async fn list_verified_doctors(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorPublicView>>, ApiError> {
    let profiles = state.profiles.list_verified()?;

    Ok(Json(
        profiles.iter().map(DoctorPublicView::from_profile).collect(),
    ))
}

/// GET /doctors/:id (public) - a single verified profile
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<DoctorPublicView>, ApiError> {
    let profile = state
        .profiles
        .get_verified(&doctor_id)?
        .ok_or(ApiError::NotFound("Verified doctor"))?;

    Ok(Json(DoctorPublicView::from_profile(&profile)))
}
