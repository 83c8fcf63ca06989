//! PostgreSQL catalog source and connection pool management.
//!
//! All operations issued through this module are read-only catalog
//! queries. Credentials are passed straight into the driver options and
//! never stored or included in error messages.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{PgPool, Row};

use crate::Result;
use crate::catalog::{BoxError, CatalogQuery};
use crate::error::SchemaDocError;

/// Connection parameters for the documented database.
///
/// The password is intentionally not part of this struct; it is handed to
/// [`connect`] separately so it never appears in logs or `Debug` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Database host address.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Database user.
    pub username: String,
}

impl std::fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Intentionally omits username and never includes credentials
        write!(f, "{}:{}/{}", self.host, self.port, self.database)
    }
}

impl ConnectionConfig {
    /// Validates connection parameters before a pool is created.
    ///
    /// # Errors
    /// Returns a configuration error if any parameter is unusable
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(SchemaDocError::configuration("host cannot be empty"));
        }
        if self.port == 0 {
            return Err(SchemaDocError::configuration(
                "port must be greater than 0",
            ));
        }
        if self.database.is_empty() {
            return Err(SchemaDocError::configuration(
                "database name cannot be empty",
            ));
        }
        Ok(())
    }
}

// Pool sizing for a one-shot batch run: a handful of connections with
// short idle and lifetime windows.
const MAX_CONNECTIONS: u32 = 4;
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_LIFETIME: Duration = Duration::from_secs(60);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a connection pool for the configured database.
///
/// The pool connects eagerly so setup failures surface here rather than
/// at the first catalog query.
///
/// # Errors
/// Returns a configuration error for invalid parameters or a connection
/// error when the pool cannot be established
pub async fn connect(config: &ConnectionConfig, password: &str) -> Result<PgPool> {
    config.validate()?;

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.username)
        .password(password)
        .ssl_mode(PgSslMode::Disable)
        .application_name(concat!("schemadoc-", env!("CARGO_PKG_VERSION")));

    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await
        .map_err(|e| SchemaDocError::connection_failed(format!("cannot connect to {config}"), e))
}

/// Catalog source backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Wraps an established pool as a catalog source.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogQuery for PgCatalog {
    async fn query(
        &self,
        sql: &str,
        params: &[&str],
    ) -> std::result::Result<Vec<Vec<String>>, BoxError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }
        let rows = query.fetch_all(&self.pool).await?;

        // Every selected expression is text, so each field decodes as a
        // string by position.
        let mut decoded = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut fields = Vec::with_capacity(row.len());
            for index in 0..row.len() {
                fields.push(row.try_get::<String, _>(index)?);
            }
            decoded.push(fields);
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConnectionConfig {
        ConnectionConfig {
            host: "localhost".to_string(),
            port: 5432,
            database: "app".to_string(),
            username: "reader".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let config = ConnectionConfig {
            host: String::new(),
            ..config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let config = ConnectionConfig {
            port: 0,
            ..config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_database() {
        let config = ConnectionConfig {
            database: String::new(),
            ..config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_omits_username() {
        let display = config().to_string();
        assert_eq!(display, "localhost:5432/app");
        assert!(!display.contains("reader"));
    }
}
