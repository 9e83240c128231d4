//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};

use common::{AppError, AppResult};
use domain::{BEARER_TOKEN_PREFIX, ROLE_ADMIN};

use crate::http::state::AppState;
use crate::service::RequestIdentity;

/// Current authenticated user extracted from JWT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub authorities: Vec<String>,
}

impl CurrentUser {
    pub fn has_role(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }
}

/// Check if user has admin privileges.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Check that the user holds at least one of `authorities`.
pub fn require_any_role(user: &CurrentUser, authorities: &[&str]) -> AppResult<()> {
    if authorities.iter().any(|a| user.has_role(a)) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates JWT tokens.
///
/// The rest of the request runs with the token's subject as the principal
/// seen by [`RequestIdentity`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;

    let claims = state
        .services
        .auth()
        .verify_token(token)
        .map_err(|_| AppError::Unauthorized)?;

    let current_user = CurrentUser {
        username: claims.sub,
        authorities: claims.authorities,
    };
    let username = current_user.username.clone();

    request.extensions_mut().insert(current_user);

    Ok(RequestIdentity::scope(username, next.run(request)).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized)
}
