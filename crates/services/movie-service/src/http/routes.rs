//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{
    admin_movie_routes, auth_routes, health_routes, movie_routes, score_routes,
};
use crate::http::middleware::auth_middleware;
use crate::http::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Login (no auth)
        .nest("/auth", auth_routes())
        // Reads are public, writes need a token
        .nest(
            "/movies",
            movie_routes().merge(admin_movie_routes().route_layer(
                middleware::from_fn_with_state(state.clone(), auth_middleware),
            )),
        )
        .nest(
            "/scores",
            score_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
