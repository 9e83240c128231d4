//! Score handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::put,
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::AppResult;
use domain::{MovieDto, ScoreInput, ROLE_ADMIN, ROLE_CLIENT};

use crate::http::extractors::ValidatedJson;
use crate::http::middleware::{require_any_role, CurrentUser};
use crate::http::state::AppState;

/// Score submission request
#[derive(Debug, Deserialize, Validate)]
pub struct ScoreRequest {
    pub movie_id: i64,
    #[validate(range(min = 0.0, max = 5.0, message = "Score must be between 0 and 5"))]
    pub score: f64,
}

impl From<ScoreRequest> for ScoreInput {
    fn from(req: ScoreRequest) -> Self {
        Self {
            movie_id: req.movie_id,
            score: req.score,
        }
    }
}

/// Create score routes; expects the auth middleware in front.
pub fn score_routes() -> Router<AppState> {
    Router::new().route("/", put(save_score))
}

/// Score a movie as the authenticated user
pub async fn save_score(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ScoreRequest>,
) -> AppResult<Json<MovieDto>> {
    require_any_role(&current_user, &[ROLE_CLIENT, ROLE_ADMIN])?;
    let movie = state.services.scores().save_score(payload.into()).await?;
    Ok(Json(movie))
}
