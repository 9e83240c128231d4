//! Movie service configuration.

use std::env;

use common::{DatabaseConfig, JwtConfig, ServiceConfig};
use domain::DEFAULT_JWT_EXPIRATION_HOURS;

/// Secret used by debug builds when `JWT_SECRET` is unset
const DEV_JWT_SECRET: &str = "dev-secret-key-change-in-production-32chars!";

/// Movie service configuration.
#[derive(Debug, Clone)]
pub struct MovieServiceConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl MovieServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server: ServiceConfig {
                service_name: defaults.server.service_name,
                host: env::var("MOVIE_SERVICE_HOST").unwrap_or(defaults.server.host),
                port: env::var("MOVIE_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            database: DatabaseConfig {
                url: env::var("MOVIE_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: defaults.database.min_connections,
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or_else(|_| {
                    if cfg!(debug_assertions) {
                        DEV_JWT_SECRET.to_string()
                    } else {
                        String::new()
                    }
                }),
                expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|h| h.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
        }
    }
}

impl Default for MovieServiceConfig {
    fn default() -> Self {
        Self {
            server: ServiceConfig {
                service_name: "movie-service".to_string(),
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_binds_all_interfaces() {
        let config = MovieServiceConfig::default();
        assert_eq!(config.server.addr(), "0.0.0.0:8080");
        assert_eq!(config.jwt.expiration_hours, DEFAULT_JWT_EXPIRATION_HOURS);
    }

    #[test]
    fn test_dev_secret_is_strong_enough() {
        let jwt = JwtConfig {
            secret: DEV_JWT_SECRET.to_string(),
            expiration_hours: 1,
        };
        assert!(jwt.has_strong_secret());
    }
}
