//! Service wiring.
//!
//! Builds every service once from a database connection and hands out
//! shared trait objects to the HTTP layer.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use common::JwtConfig;

use super::auth_service::{AuthService, Authenticator};
use super::identity::RequestIdentity;
use super::movie_service::{MovieManager, MovieService};
use super::score_service::{ScoreManager, ScoreService};
use super::user_service::{UserManager, UserService};
use crate::repository::{MovieStore, Persistence, UserStore};

/// Shared service handles
#[derive(Clone)]
pub struct Services {
    movies: Arc<dyn MovieService>,
    scores: Arc<dyn ScoreService>,
    users: Arc<dyn UserService>,
    auth: Arc<dyn AuthService>,
}

impl Services {
    pub fn new(
        movies: Arc<dyn MovieService>,
        scores: Arc<dyn ScoreService>,
        users: Arc<dyn UserService>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            movies,
            scores,
            users,
            auth,
        }
    }

    /// Wire the production services on top of `db`
    pub fn from_connection(db: DatabaseConnection, jwt: JwtConfig) -> Self {
        let users: Arc<dyn UserService> = Arc::new(UserManager::new(
            Arc::new(UserStore::new(db.clone())),
            Arc::new(RequestIdentity),
        ));
        let movies = Arc::new(MovieManager::new(Arc::new(MovieStore::new(db.clone()))));
        let scores = Arc::new(ScoreManager::new(
            users.clone(),
            Arc::new(Persistence::new(db)),
        ));
        let auth = Arc::new(Authenticator::new(users.clone(), jwt));

        Self::new(movies, scores, users, auth)
    }

    pub fn movies(&self) -> Arc<dyn MovieService> {
        self.movies.clone()
    }

    pub fn scores(&self) -> Arc<dyn ScoreService> {
        self.scores.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.users.clone()
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth.clone()
    }
}
