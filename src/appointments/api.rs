//! Appointment Endpoints
//! Mission: Booking, listing with display-name enrichment, and lifecycle

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::appointments::models::{
    Appointment, AppointmentStatus, AppointmentView, CreateAppointmentRequest, ListQuery,
    UpdateStatusRequest,
};
use crate::auth::middleware::AuthAccount;
use crate::auth::models::Role;
use crate::error::ApiError;
use crate::state::AppState;

/// Enrichment joins tolerate a missing counterpart record by substituting
/// a sentinel instead of failing the whole listing.
fn doctor_name(state: &AppState, doctor_id: &Uuid) -> String {
    state
        .profiles
        .get(doctor_id)
        .ok()
        .flatten()
        .map(|p| p.full_name)
        .unwrap_or_else(|| "Unknown Doctor".to_string())
}

fn patient_name(state: &AppState, patient_id: &Uuid) -> String {
    state
        .accounts
        .get_by_id(patient_id)
        .ok()
        .flatten()
        .map(|a| a.display_name())
        .unwrap_or_else(|| "Unknown Patient".to_string())
}

fn patient_view(state: &AppState, appointment: Appointment) -> AppointmentView {
    let doctor_name = doctor_name(state, &appointment.doctor_id);
    AppointmentView {
        appointment,
        doctor_name: Some(doctor_name),
        patient_name: None,
    }
}

fn doctor_view(state: &AppState, appointment: Appointment) -> AppointmentView {
    let patient_name = patient_name(state, &appointment.patient_id);
    AppointmentView {
        appointment,
        doctor_name: None,
        patient_name: Some(patient_name),
    }
}

/// POST /users/me/appointments (patient only)
pub async fn create_appointment(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentView>), ApiError> {
    account.require_role(Role::Patient)?;

    let appointment = state.appointments.create(
        account.id,
        payload.doctor_id,
        payload.date,
        &payload.time,
        &payload.reason,
        payload.notes.as_deref(),
        payload.contact,
    )?;

    Ok((StatusCode::CREATED, Json(patient_view(&state, appointment))))
}

/// GET /users/me/appointments (patient only)
pub async fn list_my_appointments(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    account.require_role(Role::Patient)?;

    let appointments = state
        .appointments
        .list_for_patient(&account.id, query.include_cancelled.unwrap_or(true))?;

    Ok(Json(
        appointments
            .into_iter()
            .map(|a| patient_view(&state, a))
            .collect(),
    ))
}

/// DELETE /users/me/appointments/:id (patient only, pending only)
pub async fn delete_appointment(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    account.require_role(Role::Patient)?;

    state.appointments.delete(&id, &account.id)?;

    Ok(Json(json!({ "detail": "Appointment deleted" })))
}

/// GET /doctors/me/appointments (doctor only)
pub async fn list_doctor_appointments(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    account.require_role(Role::Doctor)?;

    let appointments = state
        .appointments
        .list_for_doctor(&account.id, query.include_cancelled.unwrap_or(true))?;

    Ok(Json(
        appointments
            .into_iter()
            .map(|a| doctor_view(&state, a))
            .collect(),
    ))
}

/// PUT /doctors/me/appointments/:id/status (doctor only)
pub async fn update_appointment_status(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<AppointmentView>, ApiError> {
    account.require_role(Role::Doctor)?;

    match payload.status {
        AppointmentStatus::Confirmed | AppointmentStatus::Cancelled => {}
        _ => {
            return Err(ApiError::InvalidInput(
                "Status must be 'confirmed' or 'cancelled'".to_string(),
            ))
        }
    }

    let appointment = state
        .appointments
        .update_status(&id, &account.id, payload.status)?;

    Ok(Json(doctor_view(&state, appointment)))
}
