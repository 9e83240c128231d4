//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub database: Database,
}

impl AppState {
    pub fn new(services: Services, database: Database) -> Self {
        Self {
            services: Arc::new(services),
            database,
        }
    }
}
