//! Repository layer for data access.

pub mod entities;
mod movie_repository;
mod unit_of_work;
mod user_repository;

pub use movie_repository::{MoviePageRequest, MovieRepository, MovieSort, MovieStore};
pub use unit_of_work::{Persistence, ScoreTransaction, SeaScoreTransaction, UnitOfWork};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use movie_repository::MockMovieRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
