//! User service - identity lookups for scoring and login.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use common::{AppError, AppResult};
use domain::{User, UserDetails};

use super::identity::IdentityProvider;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// The user behind the current request.
    ///
    /// Fails with `UsernameNotFound` when no principal is attached or the
    /// principal has no matching user record.
    async fn authenticated(&self) -> AppResult<User>;

    /// Credentials and authorities for login
    async fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { repo, identity }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn authenticated(&self) -> AppResult<User> {
        let username = self.identity.logged_username().map_err(|e| {
            debug!(error = %e, "No authenticated principal");
            AppError::username_not_found("Invalid user")
        })?;

        self.repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::username_not_found("Invalid user"))
    }

    async fn load_user_by_username(&self, username: &str) -> AppResult<UserDetails> {
        let rows = self.repo.search_user_and_roles_by_username(username).await?;

        UserDetails::from_rows(rows)
            .ok_or_else(|| AppError::username_not_found("Username not found"))
    }
}
