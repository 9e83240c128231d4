//! Score value object and score records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCORE, MIN_SCORE, SCORE_SCALE};
use crate::error::{DomainError, DomainResult};

/// A single rating, guaranteed within `[MIN_SCORE, MAX_SCORE]`.
///
/// Held as whole thousandths ([`SCORE_SCALE`] units per point) so sums of
/// scores are exact and independent of the order they are added in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScoreValue(i64);

impl ScoreValue {
    /// Validate and round to the nearest thousandth
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(DomainError::validation(format!(
                "Score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }
        Ok(Self((value * SCORE_SCALE as f64).round() as i64))
    }

    /// Fixed-point units
    pub fn units(self) -> i64 {
        self.0
    }

    pub fn get(self) -> f64 {
        self.0 as f64 / SCORE_SCALE as f64
    }
}

impl TryFrom<f64> for ScoreValue {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Score submission data transfer object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreInput {
    pub movie_id: i64,
    pub score: f64,
}

/// Score log entry to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewScore {
    pub movie_id: i64,
    pub user_id: i64,
    pub value: ScoreValue,
}

/// Persisted score log entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Score {
    pub id: i64,
    pub movie_id: i64,
    pub user_id: i64,
    pub value: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(ScoreValue::new(0.0).is_ok());
        assert!(ScoreValue::new(5.0).is_ok());
    }

    #[test]
    fn test_rounds_to_thousandths() {
        assert_eq!(ScoreValue::new(0.1).unwrap().units(), 100);
        assert_eq!(ScoreValue::new(4.12345).unwrap().units(), 4123);
        assert_eq!(ScoreValue::new(2.5).unwrap().get(), 2.5);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(ScoreValue::new(-0.5).is_err());
        assert!(ScoreValue::new(5.5).is_err());
        assert!(ScoreValue::new(f64::NAN).is_err());
        assert!(ScoreValue::try_from(f64::INFINITY).is_err());
    }
}
