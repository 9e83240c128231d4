//! Movie Service Library
//!
//! Movie catalog, user scoring and login over a REST API.
//! It can be run as a standalone binary or embedded by another runtime.

pub mod config;
pub mod http;
pub mod infra;
pub mod repository;
pub mod service;
pub mod telemetry;

use std::net::SocketAddr;

use tracing::{info, warn};

use crate::config::MovieServiceConfig;
use crate::http::{create_router, AppState};
use crate::infra::Database;
use crate::service::Services;

/// Run the movie service, overriding the configured bind address.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = MovieServiceConfig::from_env();
    config.server.host = host.to_string();
    config.server.port = port;

    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = MovieServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: MovieServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if !config.jwt.has_strong_secret() {
        return Err(format!(
            "JWT_SECRET must be at least {} characters",
            domain::MIN_JWT_SECRET_LENGTH
        )
        .into());
    }
    if std::env::var("JWT_SECRET").is_err() {
        warn!("JWT_SECRET not set, using development secret");
    }

    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Wire services
    let services = Services::from_connection(db.get_connection(), config.jwt.clone());
    let state = AppState::new(services, db);

    // Build router
    let app = create_router(state);

    // Build address
    let addr: SocketAddr = config.server.addr().parse()?;
    info!("Movie service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
