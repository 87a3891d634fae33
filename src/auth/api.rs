//! Authentication API Endpoints
//! Mission: Registration and login, including the doctor verification gate

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Form, Json,
};
use tracing::{info, warn};

use crate::auth::models::{
    AccountResponse, LoginForm, RegisterPatientRequest, Role, TokenResponse,
};
use crate::doctors::models::{DoctorProfile, DoctorPublicView, VerificationStatus};
use crate::error::ApiError;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    if !email.contains('@') {
        return Err(ApiError::InvalidInput("Invalid email address".to_string()));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::WeakPassword);
    }
    Ok(())
}

/// POST /auth/register/patient
pub async fn register_patient(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    validate_credentials(&payload.email, &payload.password)?;

    let account = state.accounts.create(
        &payload.email,
        &payload.password,
        payload.full_name.as_deref(),
        Role::Patient,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::from_account(&account)),
    ))
}

/// Multipart fields collected from the doctor registration form.
#[derive(Default)]
struct DoctorRegistrationForm {
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
    specialty: Option<String>,
    bio: Option<String>,
    photo: Option<(String, Vec<u8>)>,
    degree: Option<(String, Vec<u8>)>,
}

impl DoctorRegistrationForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart body: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match name.as_str() {
                "email" => form.email = Some(text(field).await?),
                "password" => form.password = Some(text(field).await?),
                "full_name" => form.full_name = Some(text(field).await?),
                "specialty" => form.specialty = Some(text(field).await?),
                "bio" => form.bio = Some(text(field).await?),
                "photo" => form.photo = Some(file(field).await?),
                "degree" => form.degree = Some(file(field).await?),
                _ => {}
            }
        }

        Ok(form)
    }

    fn require(field: Option<String>, name: &str) -> Result<String, ApiError> {
        field.ok_or_else(|| ApiError::InvalidInput(format!("Missing field: {name}")))
    }
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart body: {e}")))
}

async fn file(
    field: axum::extract::multipart::Field<'_>,
) -> Result<(String, Vec<u8>), ApiError> {
    let filename = field
        .file_name()
        .unwrap_or("upload.bin")
        .to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart body: {e}")))?;
    Ok((filename, bytes.to_vec()))
}

/// POST /auth/register/doctor (multipart)
///
/// Creates the account plus a pending profile; the photo and degree files
/// go through the media upload collaborator first, and an upload failure
/// aborts the whole registration.
pub async fn register_doctor(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DoctorPublicView>), ApiError> {
    let form = DoctorRegistrationForm::from_multipart(multipart).await?;

    let email = DoctorRegistrationForm::require(form.email, "email")?;
    let password = DoctorRegistrationForm::require(form.password, "password")?;
    let full_name = DoctorRegistrationForm::require(form.full_name, "full_name")?;
    let specialty = DoctorRegistrationForm::require(form.specialty, "specialty")?;
    let (photo_name, photo_bytes) = form
        .photo
        .ok_or_else(|| ApiError::InvalidInput("Missing field: photo".to_string()))?;
    let (degree_name, degree_bytes) = form
        .degree
        .ok_or_else(|| ApiError::InvalidInput("Missing field: degree".to_string()))?;

    validate_credentials(&email, &password)?;

    if state.accounts.get_by_email(&email)?.is_some() {
        return Err(ApiError::DuplicateEmail);
    }

    let photo_url = state
        .uploader
        .upload(photo_bytes, &photo_name, "clinic/doctor_photos")
        .await?;
    let degree_url = state
        .uploader
        .upload(degree_bytes, &degree_name, "clinic/doctor_degrees")
        .await?;

    let account = state
        .accounts
        .create(&email, &password, Some(&full_name), Role::Doctor)?;

    let profile = DoctorProfile {
        doctor_id: account.id,
        full_name,
        specialty,
        bio: form.bio,
        photo_url: Some(photo_url),
        degree_url: Some(degree_url),
        status: VerificationStatus::Pending,
    };
    state.profiles.create(&profile)?;

    info!("Doctor registered (pending verification): {}", account.id);

    Ok((
        StatusCode::CREATED,
        Json(DoctorPublicView::from_profile(&profile)),
    ))
}

/// POST /auth/login (form-encoded, OAuth2 password flow)
///
/// Doctors are additionally gated on a verified profile; that check runs
/// strictly after password verification so verification status never
/// leaks to unauthenticated callers.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(account) = state
        .accounts
        .verify_password(&form.username, &form.password)?
    else {
        warn!("Failed login attempt: {}", form.username);
        return Err(ApiError::InvalidCredentials);
    };

    if account.role == Role::Doctor {
        let verified = state
            .profiles
            .get(&account.id)?
            .map(|p| p.status == VerificationStatus::Verified)
            .unwrap_or(false);
        if !verified {
            return Err(ApiError::Forbidden(
                "Doctor account not verified. Please wait for admin approval.",
            ));
        }
    }

    let (access_token, expires_in) = state.jwt.issue(account.id, account.role)?;

    info!("Login successful: {} ({})", account.email, account.role.as_str());

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in,
    }))
}
