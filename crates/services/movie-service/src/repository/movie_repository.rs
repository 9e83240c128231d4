//! Movie repository: catalog CRUD and paged title search.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, Order};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

use super::entities::movie::{self, ActiveModel, Entity as MovieEntity};
use common::{AppError, AppResult, OptionExt, PaginationParams, SortDirection};
use domain::{Movie, NewMovie};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sortable movie properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieSort {
    #[default]
    Id,
    Title,
    Score,
}

/// Page, size and ordering for a movie listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePageRequest {
    pub params: PaginationParams,
    pub sort: MovieSort,
    pub direction: SortDirection,
}

/// Movie repository trait for dependency injection.
///
/// Lookups return `None`/`false` for missing rows; only
/// [`MovieRepository::get_reference`] fails eagerly with `NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Find movie by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>>;

    /// Load a movie that is expected to exist, failing with `NotFound` otherwise
    async fn get_reference(&self, id: i64) -> AppResult<Movie>;

    /// Check whether a movie with this ID exists
    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Case-insensitive title substring search; returns the page and the total
    async fn search_by_title(
        &self,
        title: &str,
        page: &MoviePageRequest,
    ) -> AppResult<(Vec<Movie>, u64)>;

    /// Insert a new movie with an empty score aggregate
    async fn insert(&self, movie: NewMovie) -> AppResult<Movie>;

    /// Persist all fields of an existing movie
    async fn save(&self, movie: Movie) -> AppResult<Movie>;

    /// Delete movie by ID.
    ///
    /// Foreign key violations are reported as `AppError::Constraint`.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of MovieRepository
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Average expression used for ordering by score
const AVERAGE_SCORE_SQL: &str =
    "CASE WHEN count = 0 THEN 0 ELSE score_sum::double precision / count END";

/// Lowercase `LIKE` pattern matching `title` anywhere, wildcards backslash-escaped
fn contains_pattern(title: &str) -> String {
    let mut escaped = String::with_capacity(title.len() + 2);
    escaped.push('%');
    for c in title.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

#[async_trait]
impl MovieRepository for MovieStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let result = MovieEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Movie::from))
    }

    async fn get_reference(&self, id: i64) -> AppResult<Movie> {
        MovieEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Movie::from)
            .ok_or_not_found()
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let count = MovieEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn search_by_title(
        &self,
        title: &str,
        page: &MoviePageRequest,
    ) -> AppResult<(Vec<Movie>, u64)> {
        let mut query = MovieEntity::find();

        if !title.trim().is_empty() {
            query = query.filter(
                Expr::expr(Func::lower(Expr::col(movie::Column::Title)))
                    .like(LikeExpr::new(contains_pattern(title)).escape('\\')),
            );
        }

        let order = order_of(page.direction);
        query = match page.sort {
            MovieSort::Id => query.order_by(movie::Column::Id, order),
            MovieSort::Title => query
                .order_by(movie::Column::Title, order)
                .order_by_asc(movie::Column::Id),
            MovieSort::Score => query
                .order_by(Expr::cust(AVERAGE_SCORE_SQL), order)
                .order_by_asc(movie::Column::Id),
        };

        let paginator = query.paginate(&self.db, page.params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.params.index()).await?;

        Ok((models.into_iter().map(Movie::from).collect(), total))
    }

    async fn insert(&self, movie: NewMovie) -> AppResult<Movie> {
        let active_model = ActiveModel {
            id: NotSet,
            title: Set(movie.title),
            image: Set(movie.image),
            count: Set(0),
            score_sum: Set(0),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Movie::from(model))
    }

    async fn save(&self, movie: Movie) -> AppResult<Movie> {
        let active: ActiveModel = movie.into();

        match active.update(&self.db).await {
            Ok(model) => Ok(Movie::from(model)),
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = MovieEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from_db)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
