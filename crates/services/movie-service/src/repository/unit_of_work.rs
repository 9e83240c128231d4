//! Unit of Work for the score aggregate update.
//!
//! Loading a movie, folding a score into its aggregate, saving it and
//! logging the score must happen in one database transaction; otherwise two
//! concurrent scorers can overwrite each other's update.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, NotSet, QuerySelect, Set, TransactionTrait,
};

use super::entities::movie::{ActiveModel as MovieActiveModel, Entity as MovieEntity};
use super::entities::score::ActiveModel as ScoreActiveModel;
use common::{AppError, AppResult};
use domain::{Movie, NewScore, Score};

/// Starts transactions for the score workflow.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a read-write transaction
    async fn begin(&self) -> AppResult<Box<dyn ScoreTransaction>>;
}

/// Repository operations bound to one open transaction.
///
/// Dropping the transaction without [`ScoreTransaction::commit`] discards
/// every write made through it.
#[async_trait]
pub trait ScoreTransaction: Send + Sync {
    /// Load a movie and lock its row until the transaction ends
    async fn find_movie_for_update(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Persist the movie's fields
    async fn save_movie(&self, movie: Movie) -> AppResult<Movie>;

    /// Append a score log entry
    async fn insert_score(&self, score: NewScore) -> AppResult<Score>;

    /// Commit all writes
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard all writes
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn begin(&self) -> AppResult<Box<dyn ScoreTransaction>> {
        // Row locks give per-movie serialization, so ReadCommitted is enough
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        Ok(Box::new(SeaScoreTransaction { txn }))
    }
}

/// Transaction-bound repository backed by SeaORM.
pub struct SeaScoreTransaction {
    txn: DatabaseTransaction,
}

#[async_trait]
impl ScoreTransaction for SeaScoreTransaction {
    async fn find_movie_for_update(&self, id: i64) -> AppResult<Option<Movie>> {
        let result = MovieEntity::find_by_id(id)
            .lock_exclusive()
            .one(&self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Movie::from))
    }

    async fn save_movie(&self, movie: Movie) -> AppResult<Movie> {
        let active: MovieActiveModel = movie.into();

        match active.update(&self.txn).await {
            Ok(model) => Ok(Movie::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn insert_score(&self, score: NewScore) -> AppResult<Score> {
        let active_model = ScoreActiveModel {
            id: NotSet,
            movie_id: Set(score.movie_id),
            user_id: Set(score.user_id),
            value: Set(score.value.get()),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(&self.txn)
            .await
            .map_err(AppError::from_db)?;

        Ok(Score::from(model))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.txn.commit().await.map_err(AppError::from)
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.txn.rollback().await.map_err(AppError::from)
    }
}
