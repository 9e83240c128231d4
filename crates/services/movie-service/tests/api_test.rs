//! Integration tests for API endpoints.
//!
//! These tests drive the router with mock services, so no database is
//! required.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use mockall::predicate::eq;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use common::{AppError, Paginated};
use domain::{MovieDto, ROLE_ADMIN, ROLE_CLIENT};
use movie_service_lib::http::{create_router, AppState};
use movie_service_lib::infra::Database;
use movie_service_lib::repository::MoviePageRequest;
use movie_service_lib::service::{
    Claims, IdentityProvider, MockAuthService, MockMovieService, MockScoreService,
    MockUserService, RequestIdentity, Services, TokenResponse,
};

const ADMIN_TOKEN: &str = "admin-token";
const CLIENT_TOKEN: &str = "client-token";

fn dto(id: i64) -> MovieDto {
    MovieDto {
        id,
        title: "The Witcher".to_string(),
        score: 4.5,
        count: 2,
        image: "https://img/witcher.jpg".to_string(),
    }
}

fn claims(sub: &str, authorities: &[&str]) -> Claims {
    Claims {
        sub: sub.to_string(),
        authorities: authorities.iter().map(|a| a.to_string()).collect(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    }
}

fn auth_service() -> MockAuthService {
    let mut auth = MockAuthService::new();
    auth.expect_verify_token().returning(|token| match token {
        ADMIN_TOKEN => Ok(claims("alex@gmail.com", &[ROLE_ADMIN, ROLE_CLIENT])),
        CLIENT_TOKEN => Ok(claims("maria@gmail.com", &[ROLE_CLIENT])),
        _ => Err(AppError::Unauthorized),
    });
    auth
}

fn app(movies: MockMovieService, scores: MockScoreService, auth: MockAuthService) -> Router {
    let services = Services::new(
        Arc::new(movies),
        Arc::new(scores),
        Arc::new(MockUserService::new()),
        Arc::new(auth),
    );
    let database = Database::from(DatabaseConnection::Disconnected);

    create_router(AppState::new(services, database))
}

fn movies_only(movies: MockMovieService) -> Router {
    app(movies, MockScoreService::new(), auth_service())
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Movie Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_list_movies_is_public() {
    let mut movies = MockMovieService::new();
    movies
        .expect_find_all()
        .withf(|title: &str, page: &MoviePageRequest| {
            title == "witch" && page.params.page == 2
        })
        .times(1)
        .returning(|_, _| Ok(Paginated::new(vec![dto(1)], 2, 12, 13)));

    let response = movies_only(movies)
        .oneshot(empty_request("GET", "/movies?title=witch&page=2", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["title"], "The Witcher");
    assert_eq!(body["meta"]["total_pages"], 2);
}

#[tokio::test]
async fn test_get_movie_not_found() {
    let mut movies = MockMovieService::new();
    movies
        .expect_find_by_id()
        .with(eq(99))
        .returning(|_| Err(AppError::NotFound));

    let response = movies_only(movies)
        .oneshot(empty_request("GET", "/movies/99", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_movie_requires_token() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let response = movies_only(movies)
        .oneshot(json_request(
            "POST",
            "/movies",
            None,
            json!({"title": "Spirited Away", "image": "https://img/spirited.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_movie_requires_admin() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let response = movies_only(movies)
        .oneshot(json_request(
            "POST",
            "/movies",
            Some(CLIENT_TOKEN),
            json!({"title": "Spirited Away", "image": "https://img/spirited.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_movie_as_admin() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().times(1).returning(|input| {
        Ok(MovieDto {
            id: 5,
            title: input.title,
            score: 0.0,
            count: 0,
            image: input.image,
        })
    });

    let response = movies_only(movies)
        .oneshot(json_request(
            "POST",
            "/movies",
            Some(ADMIN_TOKEN),
            json!({"title": "Spirited Away", "image": "https://img/spirited.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_create_movie_rejects_short_title() {
    let mut movies = MockMovieService::new();
    movies.expect_insert().never();

    let response = movies_only(movies)
        .oneshot(json_request(
            "POST",
            "/movies",
            Some(ADMIN_TOKEN),
            json!({"title": "Up", "image": "https://img/up.jpg"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_referenced_movie_conflicts() {
    let mut movies = MockMovieService::new();
    movies
        .expect_delete()
        .with(eq(1))
        .returning(|_| Err(AppError::integrity("Referential integrity failure")));

    let response = movies_only(movies)
        .oneshot(empty_request("DELETE", "/movies/1", Some(ADMIN_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_movie_as_admin() {
    let mut movies = MockMovieService::new();
    movies.expect_delete().with(eq(1)).returning(|_| Ok(()));

    let response = movies_only(movies)
        .oneshot(empty_request("DELETE", "/movies/1", Some(ADMIN_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Score Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_save_score_runs_as_token_subject() {
    let mut scores = MockScoreService::new();
    scores.expect_save_score().times(1).returning(|input| {
        // Mock body executes inside the request task
        let principal = RequestIdentity.logged_username()?;
        assert_eq!(principal, "maria@gmail.com");
        assert_eq!(input.movie_id, 1);
        Ok(MovieDto {
            score: input.score,
            count: 1,
            ..dto(input.movie_id)
        })
    });

    let response = app(MockMovieService::new(), scores, auth_service())
        .oneshot(json_request(
            "PUT",
            "/scores",
            Some(CLIENT_TOKEN),
            json!({"movie_id": 1, "score": 4.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["score"], 4.0);
}

#[tokio::test]
async fn test_save_score_rejects_out_of_range() {
    let mut scores = MockScoreService::new();
    scores.expect_save_score().never();

    let response = app(MockMovieService::new(), scores, auth_service())
        .oneshot(json_request(
            "PUT",
            "/scores",
            Some(CLIENT_TOKEN),
            json!({"movie_id": 1, "score": 7.5}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_score_with_invalid_token() {
    let mut scores = MockScoreService::new();
    scores.expect_save_score().never();

    let response = app(MockMovieService::new(), scores, auth_service())
        .oneshot(json_request(
            "PUT",
            "/scores",
            Some("forged"),
            json!({"movie_id": 1, "score": 4.0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Auth And Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_login_returns_token() {
    let mut auth = auth_service();
    auth.expect_login()
        .withf(|username: &str, password: &str| {
            username == "maria@gmail.com" && password == "123456"
        })
        .returning(|_, _| {
            Ok(TokenResponse {
                access_token: CLIENT_TOKEN.to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 86400,
            })
        });

    let response = app(MockMovieService::new(), MockScoreService::new(), auth)
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"username": "maria@gmail.com", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["access_token"], CLIENT_TOKEN);
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let mut auth = auth_service();
    auth.expect_login()
        .returning(|_, _| Err(AppError::InvalidCredentials));

    let response = app(MockMovieService::new(), MockScoreService::new(), auth)
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({"username": "maria@gmail.com", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let response = movies_only(MockMovieService::new())
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["database"]["status"], "unhealthy");
}
