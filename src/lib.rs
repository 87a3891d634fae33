//! Clinic Backend Library
//!
//! Clinic-management API: registration, admin-verified doctors,
//! appointment booking with a one-way lifecycle, prescriptions, reviews,
//! and a broadcast-only signaling stub for video calls.

pub mod appointments;
pub mod auth;
pub mod config;
mod db;
pub mod doctors;
pub mod error;
pub mod media;
pub mod middleware;
pub mod prescriptions;
pub mod reviews;
pub mod signaling;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Online Clinic API!" }))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Build the full application router: public routes, auth routes, and the
/// token-gated protected routes, merged behind CORS and request logging.
pub fn app(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/auth/register/patient", post(auth::api::register_patient))
        .route("/auth/register/doctor", post(auth::api::register_doctor))
        .route("/auth/login", post(auth::api::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route(
            "/users/me/appointments",
            get(appointments::api::list_my_appointments)
                .post(appointments::api::create_appointment),
        )
        .route(
            "/users/me/appointments/:id",
            delete(appointments::api::delete_appointment),
        )
        .route(
            "/users/me/prescriptions",
            get(prescriptions::api::list_my_prescriptions),
        )
        .route(
            "/doctors/me/appointments",
            get(appointments::api::list_doctor_appointments),
        )
        .route(
            "/doctors/me/appointments/:id/status",
            put(appointments::api::update_appointment_status),
        )
        .route(
            "/admin/doctors/pending",
            get(doctors::api::list_pending_doctors),
        )
        .route("/admin/doctors/:id/verify", patch(doctors::api::verify_doctor))
        .route("/admin/doctors/:id/reject", patch(doctors::api::reject_doctor))
        .route("/reviews/:doctor_id", post(reviews::api::create_review))
        .route_layer(axum_middleware::from_fn_with_state(
            state.jwt.clone(),
            auth::middleware::auth_middleware,
        ))
        .with_state(state.clone());

    let public_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/doctors", get(doctors::api::list_verified_doctors))
        .route("/doctors/:id", get(doctors::api::get_doctor))
        .route("/reviews/:doctor_id", get(reviews::api::list_reviews))
        .route("/ws/video-call/:room_id", get(signaling::video_call_handler))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(auth_routes)
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .layer(CorsLayer::permissive())
}
