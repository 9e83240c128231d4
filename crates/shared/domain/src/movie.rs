//! Movie aggregate and its public views.

use serde::{Deserialize, Serialize};

use crate::constants::SCORE_SCALE;
use crate::error::{DomainError, DomainResult};
use crate::score::ScoreValue;

/// Movie domain entity.
///
/// Owns the rating aggregate exclusively: `count` is the number of accepted
/// scores and `score_sum` their total in [`SCORE_SCALE`] units. The average
/// is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub count: i32,
    pub score_sum: i64,
}

impl Movie {
    /// Average of all accepted scores, `0.0` when nothing was scored yet.
    pub fn average(&self) -> f64 {
        if self.count > 0 {
            self.score_sum as f64 / (f64::from(self.count) * SCORE_SCALE as f64)
        } else {
            0.0
        }
    }

    /// Fold one accepted score into the aggregate.
    ///
    /// Count grows by exactly one per call; the sum is order independent.
    pub fn apply_score(&mut self, value: ScoreValue) -> DomainResult<()> {
        let count = self
            .count
            .checked_add(1)
            .ok_or_else(|| DomainError::internal("Score count overflow"))?;

        let score_sum = self
            .score_sum
            .checked_add(value.units())
            .ok_or_else(|| DomainError::internal("Score sum overflow"))?;

        self.score_sum = score_sum;
        self.count = count;
        Ok(())
    }

    /// Overwrite the mutable catalog fields, leaving the aggregate untouched.
    pub fn apply_input(&mut self, input: MovieInput) {
        self.title = input.title;
        self.image = input.image;
    }
}

/// Data needed to create a movie. New movies start with an empty aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub image: String,
}

impl From<MovieInput> for NewMovie {
    fn from(input: MovieInput) -> Self {
        Self {
            title: input.title,
            image: input.image,
        }
    }
}

/// Movie create/update data transfer object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieInput {
    /// Movie title
    pub title: String,
    /// Poster image URL
    pub image: String,
}

/// Movie response (public view including the derived average)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    /// Average score
    pub score: f64,
    /// Number of scores received
    pub count: i32,
    pub image: String,
}

impl From<Movie> for MovieDto {
    fn from(movie: Movie) -> Self {
        let score = movie.average();
        Self {
            id: movie.id,
            title: movie.title,
            score,
            count: movie.count,
            image: movie.image,
        }
    }
}

impl From<&Movie> for MovieDto {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            score: movie.average(),
            count: movie.count,
            image: movie.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Movie {
        Movie {
            id: 1,
            title: "The Witcher".to_string(),
            image: "https://example.com/witcher.jpg".to_string(),
            count: 0,
            score_sum: 0,
        }
    }

    fn score(value: f64) -> ScoreValue {
        ScoreValue::new(value).unwrap()
    }

    #[test]
    fn test_average_is_zero_without_scores() {
        assert_eq!(movie().average(), 0.0);
    }

    #[test]
    fn test_apply_score_updates_sum_and_count() {
        let mut m = movie();
        m.apply_score(score(4.0)).unwrap();

        assert_eq!(m.count, 1);
        assert_eq!(m.score_sum, 4000);
        assert_eq!(m.average(), 4.0);
    }

    #[test]
    fn test_two_scores_average_is_order_independent() {
        let mut a = movie();
        a.apply_score(score(4.5)).unwrap();
        a.apply_score(score(2.0)).unwrap();

        let mut b = movie();
        b.apply_score(score(2.0)).unwrap();
        b.apply_score(score(4.5)).unwrap();

        assert_eq!(a.count, 2);
        assert_eq!(a.average(), (4.5 + 2.0) / 2.0);
        assert_eq!(a.average(), b.average());
        assert_eq!(a.count, b.count);
    }

    #[test]
    fn test_decimal_scores_average_is_order_independent() {
        let mut forward = movie();
        for value in [0.1, 0.2, 0.3] {
            forward.apply_score(score(value)).unwrap();
        }

        let mut backward = movie();
        for value in [0.3, 0.2, 0.1] {
            backward.apply_score(score(value)).unwrap();
        }

        assert_eq!(forward.score_sum, 600);
        assert_eq!(forward.score_sum, backward.score_sum);
        assert_eq!(forward.average(), backward.average());
        assert_eq!(forward.average(), 0.2);
    }

    #[test]
    fn test_apply_score_rejects_count_overflow() {
        let mut m = movie();
        m.count = i32::MAX;

        assert!(m.apply_score(score(1.0)).is_err());
        assert_eq!(m.count, i32::MAX);
        assert_eq!(m.score_sum, 0);
    }

    #[test]
    fn test_apply_input_keeps_aggregate() {
        let mut m = movie();
        m.apply_score(score(3.0)).unwrap();
        m.apply_input(MovieInput {
            title: "NEW_TITLE".to_string(),
            image: "https://example.com/new.jpg".to_string(),
        });

        assert_eq!(m.title, "NEW_TITLE");
        assert_eq!(m.count, 1);
        assert_eq!(m.score_sum, 3000);
    }

    #[test]
    fn test_dto_carries_average() {
        let mut m = movie();
        m.apply_score(score(5.0)).unwrap();
        m.apply_score(score(4.0)).unwrap();

        let dto = MovieDto::from(&m);
        assert_eq!(dto.id, 1);
        assert_eq!(dto.score, 4.5);
        assert_eq!(dto.count, 2);
    }
}
