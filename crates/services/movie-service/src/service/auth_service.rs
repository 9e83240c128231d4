//! Authentication service - credential checks and JWT issuance.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

use common::{AppError, AppResult, JwtConfig};
use domain::{Password, UserDetails, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

use super::user_service::UserService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    pub authorities: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue an access token
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the user service.
pub struct Authenticator {
    users: Arc<dyn UserService>,
    jwt: JwtConfig,
}

/// Well-formed hash checked when the username is unknown, so a miss costs
/// as much as a wrong password.
fn dummy_hash() -> &'static str {
    static DUMMY: OnceLock<String> = OnceLock::new();
    DUMMY.get_or_init(|| {
        Password::new("dummy-password-never-matches")
            .map(Password::into_string)
            .unwrap_or_default()
    })
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserService>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    fn generate_token(&self, user: &UserDetails) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: user.username.clone(),
            authorities: user.authorities(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expiration_hours * SECONDS_PER_HOUR,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let details = match self.users.load_user_by_username(username).await {
            Ok(details) => Some(details),
            Err(AppError::UsernameNotFound(_)) => None,
            Err(e) => return Err(e),
        };

        let stored = match &details {
            Some(user) => Password::from_hash(user.password_hash.as_str()),
            None => Password::from_hash(dummy_hash()),
        };
        let password_valid = stored.verify(password);

        match details {
            Some(user) if password_valid => self.generate_token(&user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
