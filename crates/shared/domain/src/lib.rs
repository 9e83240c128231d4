//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the movie rating aggregate, score values, and the user/role model used
//! for authentication.

pub mod constants;
pub mod error;
pub mod movie;
pub mod password;
pub mod score;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use movie::{Movie, MovieDto, MovieInput, NewMovie};
pub use password::Password;
pub use score::{NewScore, Score, ScoreInput, ScoreValue};
pub use user::{Role, User, UserDetails, UserDetailsRow};
