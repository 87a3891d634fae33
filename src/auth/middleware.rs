//! Authentication Middleware
//! Mission: Gate protected routes behind bearer-token validation

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::jwt::JwtHandler;
use crate::auth::models::{Account, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Validates the `Authorization: Bearer` header and stashes the decoded
/// claims in request extensions for the handlers behind it.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(ApiError::Unauthenticated)?;

    let claims = jwt_handler.validate(&token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// The authenticated account, resolved from the claims the middleware
/// stored. Fails `Unauthenticated` when the account behind a valid token
/// no longer exists.
pub struct AuthAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)?;

        let account_id =
            Uuid::parse_str(&claims.sub).map_err(|_| ApiError::Unauthenticated)?;

        let account = state
            .accounts
            .get_by_id(&account_id)?
            .ok_or(ApiError::Unauthenticated)?;

        Ok(AuthAccount(account))
    }
}
