//! Resolution of the caller's identity for the current request.
//!
//! The HTTP auth middleware runs each authenticated request inside
//! [`RequestIdentity::scope`]; anything awaited within that future can read
//! the principal back through [`IdentityProvider::logged_username`].

use std::future::Future;

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

tokio::task_local! {
    static PRINCIPAL: String;
}

/// Source of the authenticated principal's username.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait IdentityProvider: Send + Sync {
    /// Username of the caller, or an error when no principal is attached
    fn logged_username(&self) -> AppResult<String>;
}

/// Reads the principal attached to the running request task.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdentity;

impl RequestIdentity {
    /// Run `fut` with `username` as the authenticated principal
    pub async fn scope<F>(username: String, fut: F) -> F::Output
    where
        F: Future,
    {
        PRINCIPAL.scope(username, fut).await
    }
}

impl IdentityProvider for RequestIdentity {
    fn logged_username(&self) -> AppResult<String> {
        PRINCIPAL
            .try_with(Clone::clone)
            .map_err(|_| AppError::Unauthorized)
    }
}
