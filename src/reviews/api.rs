//! Review Endpoints
//! Mission: Patient-authored reviews, publicly readable

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthAccount;
use crate::auth::models::Role;
use crate::error::ApiError;
use crate::reviews::models::{Review, ReviewCreate};
use crate::state::AppState;

/// POST /reviews/:doctor_id (patient only)
///
/// Reviews do not require an appointment history with the doctor.
pub async fn create_review(
    State(state): State<AppState>,
    AuthAccount(account): AuthAccount,
    Path(doctor_id): Path<Uuid>,
    Json(payload): Json<ReviewCreate>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    account.require_role(Role::Patient)?;

    if !(1..=5).contains(&payload.rating) {
        return Err(ApiError::InvalidRating);
    }

    let review = state.reviews.create(
        doctor_id,
        account.id,
        payload.rating,
        payload.comment.as_deref(),
    )?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /reviews/:doctor_id (public)
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(doctor_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.reviews.list_for_doctor(&doctor_id)?))
}
