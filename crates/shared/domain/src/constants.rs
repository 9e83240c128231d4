//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Authority granted to regular users (may submit scores)
pub const ROLE_CLIENT: &str = "ROLE_CLIENT";

/// Authority granted to administrators (may manage the movie catalog)
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

// =============================================================================
// Scores
// =============================================================================

/// Lowest score a user may give a movie
pub const MIN_SCORE: f64 = 0.0;

/// Highest score a user may give a movie
pub const MAX_SCORE: f64 = 5.0;

/// Fixed-point units per score point (scores keep three decimals)
pub const SCORE_SCALE: i64 = 1000;

// =============================================================================
// Authentication
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
