pub mod connection;

pub use connection::MiddlewarePoolConnection;

use deadpool_postgres::{Config as PgConfig, Pool, Runtime};
use tokio_postgres::NoTls;
use tracing::info;

use crate::config::DbSettings;
use crate::error::LightbnbDbError;

/// Configuration and connection pool for the LightBnB store
///
/// Cloning is cheap and every clone shares the same underlying pool, so one
/// `ConfigAndPool` is built at startup and handed to every [`crate::store::Store`].
#[derive(Clone, Debug)]
pub struct ConfigAndPool {
    /// The connection pool
    pub pool: Pool,
}

impl ConfigAndPool {
    /// Build a pool from environment-derived [`DbSettings`].
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ConnectionError` if pool creation fails.
    pub async fn from_settings(settings: &DbSettings) -> Result<Self, LightbnbDbError> {
        Self::new_postgres(settings.to_pg_config()).await
    }

    /// Asynchronous initializer for `ConfigAndPool` with Postgres
    ///
    /// No connection is opened here; the first query checks one out.
    ///
    /// # Errors
    /// Returns `LightbnbDbError::ConfigError` if required config fields are missing or `LightbnbDbError::ConnectionError` if pool creation fails.
    #[allow(clippy::unused_async)]
    pub async fn new_postgres(pg_config: PgConfig) -> Result<Self, LightbnbDbError> {
        // Validate all required config fields are present
        if pg_config.dbname.is_none() {
            return Err(LightbnbDbError::ConfigError(
                "dbname is required".to_string(),
            ));
        }
        if pg_config.host.is_none() {
            return Err(LightbnbDbError::ConfigError(
                "host is required".to_string(),
            ));
        }
        if pg_config.port.is_none() {
            return Err(LightbnbDbError::ConfigError(
                "port is required".to_string(),
            ));
        }
        if pg_config.user.is_none() {
            return Err(LightbnbDbError::ConfigError(
                "user is required".to_string(),
            ));
        }
        if pg_config.password.is_none() {
            return Err(LightbnbDbError::ConfigError(
                "password is required".to_string(),
            ));
        }

        let pool = pg_config
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| {
                LightbnbDbError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;

        info!(
            host = pg_config.host.as_deref().unwrap_or_default(),
            dbname = pg_config.dbname.as_deref().unwrap_or_default(),
            "postgres pool created"
        );

        Ok(ConfigAndPool { pool })
    }

    /// Get a connection from the pool
    ///
    /// # Errors
    /// Returns `LightbnbDbError::PoolError` if the pool fails to provide a connection.
    pub async fn get_connection(&self) -> Result<MiddlewarePoolConnection, LightbnbDbError> {
        let client = self.pool.get().await?;
        Ok(MiddlewarePoolConnection::new(client))
    }
}
