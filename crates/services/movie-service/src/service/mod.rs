//! Service layer - business logic over the repository ports.

mod auth_service;
mod container;
mod identity;
mod movie_service;
mod score_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
pub use identity::{IdentityProvider, RequestIdentity};
pub use movie_service::{MovieManager, MovieService};
pub use score_service::{ScoreManager, ScoreService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use identity::MockIdentityProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use movie_service::MockMovieService;
#[cfg(any(test, feature = "test-utils"))]
pub use score_service::MockScoreService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
