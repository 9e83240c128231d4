//! Movie service - catalog listing and administration.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt, Paginated};
use domain::{MovieDto, MovieInput, NewMovie};

use crate::repository::{MoviePageRequest, MovieRepository};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Movie service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MovieService: Send + Sync {
    /// Page of movies whose title contains `title`, ignoring case
    async fn find_all(
        &self,
        title: &str,
        page: &MoviePageRequest,
    ) -> AppResult<Paginated<MovieDto>>;

    async fn find_by_id(&self, id: i64) -> AppResult<MovieDto>;

    async fn insert(&self, input: MovieInput) -> AppResult<MovieDto>;

    /// Overwrite title and image; the score aggregate is left untouched
    async fn update(&self, id: i64, input: MovieInput) -> AppResult<MovieDto>;

    /// Remove a movie that nothing references.
    ///
    /// `NotFound` if the id is unknown, `IntegrityViolation` if scores
    /// still point at it.
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of MovieService using repository.
pub struct MovieManager {
    repo: Arc<dyn MovieRepository>,
}

impl MovieManager {
    pub fn new(repo: Arc<dyn MovieRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl MovieService for MovieManager {
    async fn find_all(
        &self,
        title: &str,
        page: &MoviePageRequest,
    ) -> AppResult<Paginated<MovieDto>> {
        let (movies, total) = self.repo.search_by_title(title, page).await?;

        Ok(Paginated::new(
            movies.into_iter().map(MovieDto::from).collect(),
            page.params.index() + 1,
            page.params.limit(),
            total,
        ))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<MovieDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(MovieDto::from)
            .ok_or_not_found()
    }

    async fn insert(&self, input: MovieInput) -> AppResult<MovieDto> {
        let movie = self.repo.insert(NewMovie::from(input)).await?;
        info!(movie_id = movie.id, "Movie created");
        Ok(movie.into())
    }

    async fn update(&self, id: i64, input: MovieInput) -> AppResult<MovieDto> {
        let mut movie = self.repo.get_reference(id).await?;
        movie.apply_input(input);

        let movie = self.repo.save(movie).await?;
        info!(movie_id = id, "Movie updated");
        Ok(movie.into())
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound);
        }

        match self.repo.delete_by_id(id).await {
            Ok(()) => {
                info!(movie_id = id, "Movie deleted");
                Ok(())
            }
            Err(AppError::Constraint(detail)) => {
                warn!(movie_id = id, %detail, "Movie is still referenced");
                Err(AppError::integrity("Referential integrity failure"))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockMovieRepository;
    use domain::Movie;

    #[tokio::test]
    async fn test_find_by_id_maps_missing_to_not_found() {
        let mut repo = MockMovieRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = MovieManager::new(Arc::new(repo)).find_by_id(42).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_keeps_aggregate() {
        let mut repo = MockMovieRepository::new();
        repo.expect_get_reference().returning(|id| {
            Ok(Movie {
                id,
                title: "The Witcher".to_string(),
                image: "https://img/old.jpg".to_string(),
                count: 2,
                score_sum: 9000,
            })
        });
        repo.expect_save().returning(Ok);

        let dto = MovieManager::new(Arc::new(repo))
            .update(
                1,
                MovieInput {
                    title: "The Witcher 2".to_string(),
                    image: "https://img/new.jpg".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(dto.title, "The Witcher 2");
        assert_eq!(dto.count, 2);
        assert_eq!(dto.score, 4.5);
    }
}
