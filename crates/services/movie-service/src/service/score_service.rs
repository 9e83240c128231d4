//! Score service - records a user's score and refreshes the movie aggregate.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use common::{AppError, AppResult};
use domain::{Movie, MovieDto, NewScore, ScoreInput, ScoreValue, User};

use super::user_service::UserService;
use crate::repository::{ScoreTransaction, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Score service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Record a score from the authenticated user.
    ///
    /// The aggregate update and the score log entry commit together or not
    /// at all. Returns the movie with its refreshed average and count.
    async fn save_score(&self, input: ScoreInput) -> AppResult<MovieDto>;
}

/// Concrete implementation of ScoreService over a unit of work.
pub struct ScoreManager {
    users: Arc<dyn UserService>,
    uow: Arc<dyn UnitOfWork>,
}

impl ScoreManager {
    pub fn new(users: Arc<dyn UserService>, uow: Arc<dyn UnitOfWork>) -> Self {
        Self { users, uow }
    }

    async fn apply(
        tx: &dyn ScoreTransaction,
        user: &User,
        movie_id: i64,
        value: ScoreValue,
    ) -> AppResult<Movie> {
        let mut movie = tx
            .find_movie_for_update(movie_id)
            .await?
            .ok_or(AppError::NotFound)?;

        movie.apply_score(value)?;
        let movie = tx.save_movie(movie).await?;

        tx.insert_score(NewScore {
            movie_id,
            user_id: user.id,
            value,
        })
        .await?;

        Ok(movie)
    }
}

#[async_trait]
impl ScoreService for ScoreManager {
    async fn save_score(&self, input: ScoreInput) -> AppResult<MovieDto> {
        let user = self.users.authenticated().await?;
        let value = ScoreValue::new(input.score)?;

        let tx = self.uow.begin().await?;
        let outcome = Self::apply(tx.as_ref(), &user, input.movie_id, value).await;

        match outcome {
            Ok(movie) => {
                tx.commit().await?;
                info!(
                    movie_id = movie.id,
                    user_id = user.id,
                    count = movie.count,
                    "Score saved"
                );
                Ok(movie.into())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Failed to roll back score transaction");
                }
                Err(e)
            }
        }
    }
}
