//! API error taxonomy
//! Mission: Map every domain failure to a single HTTP status + short message

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every error the API surfaces to a caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    /// Bad, expired, or missing token; or the account behind it is gone.
    /// Deliberately opaque so token internals never leak.
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// State machine violation (appointment lifecycle or doctor verification).
    #[error("{0}")]
    InvalidTransition(&'static str),

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Password must be at least 8 characters")]
    WeakPassword,

    #[error("Rating must be an integer between 1 and 5")]
    InvalidRating,

    #[error("{0}")]
    InvalidInput(String),

    #[error("File upload failed")]
    UploadFailed,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for ApiError {
    fn from(e: rusqlite::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidTransition(_)
            | ApiError::WeakPassword
            | ApiError::InvalidRating
            | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::UploadFailed => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!("Internal error: {e:#}");
        }

        let status = self.status();
        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("nope").into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Appointment").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidTransition("already confirmed")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DuplicateEmail.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::UploadFailed.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_unauthorized_carries_www_authenticate() {
        let response = ApiError::Unauthenticated.into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
