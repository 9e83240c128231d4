//! Movie catalog handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::{AppResult, Paginated, PaginationParams, SortDirection};
use domain::{MovieDto, MovieInput};

use crate::http::extractors::ValidatedJson;
use crate::http::middleware::{require_admin, CurrentUser};
use crate::http::state::AppState;
use crate::repository::{MoviePageRequest, MovieSort};

/// Listing query: `?title=&page=&per_page=&sort=&direction=`
#[derive(Debug, Default, Deserialize)]
pub struct MovieQuery {
    #[serde(default)]
    pub title: String,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    #[serde(default)]
    pub sort: MovieSort,
    #[serde(default)]
    pub direction: SortDirection,
}

impl MovieQuery {
    pub fn page_request(&self) -> MoviePageRequest {
        let defaults = PaginationParams::default();

        MoviePageRequest {
            params: PaginationParams::new(
                self.page.unwrap_or(defaults.page),
                self.per_page.unwrap_or(defaults.per_page),
            ),
            sort: self.sort,
            direction: self.direction,
        }
    }
}

/// Movie create/update request with validation
#[derive(Debug, Deserialize, Validate)]
pub struct MovieRequest {
    #[validate(length(min = 5, max = 80, message = "Title must be between 5 and 80 characters"))]
    pub title: String,
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,
}

impl From<MovieRequest> for MovieInput {
    fn from(req: MovieRequest) -> Self {
        Self {
            title: req.title,
            image: req.image,
        }
    }
}

/// Public read routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/:id", get(get_movie))
}

/// Catalog management routes; expects the auth middleware in front.
pub fn admin_movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_movie))
        .route("/:id", put(update_movie).delete(delete_movie))
}

/// List movies, optionally filtered by title
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Json<Paginated<MovieDto>>> {
    let page = state
        .services
        .movies()
        .find_all(&query.title, &query.page_request())
        .await?;

    Ok(Json(page))
}

/// Get movie by ID
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MovieDto>> {
    let movie = state.services.movies().find_by_id(id).await?;
    Ok(Json(movie))
}

/// Create movie (admin only)
pub async fn create_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<MovieRequest>,
) -> AppResult<(StatusCode, Json<MovieDto>)> {
    require_admin(&current_user)?;
    let movie = state.services.movies().insert(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Update movie (admin only)
pub async fn update_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<MovieRequest>,
) -> AppResult<Json<MovieDto>> {
    require_admin(&current_user)?;
    let movie = state.services.movies().update(id, payload.into()).await?;
    Ok(Json(movie))
}

/// Delete movie (admin only)
pub async fn delete_movie(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.services.movies().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
