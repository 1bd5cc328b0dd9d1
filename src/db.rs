//! Database connector.
//!
//! The bootcamp handlers never query anything yet; the connection exists so
//! the process fails fast on a bad `DATABASE_URL` and so `/readyz` can report
//! on it.

use std::str::FromStr;
use std::time::Duration;

use sqlx::Connection;
use sqlx::postgres::{PgConnectOptions, PgConnection, PgPool, PgPoolOptions};

use crate::error::Result;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// A connected PostgreSQL pool plus the host it reached.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    host: String,
}

impl Database {
    /// Parses `url` and opens the pool.
    ///
    /// One plain connection is opened first so an unreachable server fails
    /// right away with its real cause (refused, bad credentials, unknown host)
    /// instead of a pool acquire timeout.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)?;
        let host = options.get_host().to_owned();

        PgConnection::connect_with(&options).await?.close().await?;

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        Ok(Self { pool, host })
    }

    /// Host name (or socket path) from the connection string.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Round-trips `SELECT 1`.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn malformed_url_is_a_database_error() {
        let err = Database::connect("definitely not a url").await.unwrap_err();
        assert!(matches!(err, Error::Database(_)), "{err}");
    }

    #[tokio::test]
    async fn refused_connection_reports_the_io_cause() {
        let started = std::time::Instant::now();
        let err = Database::connect("postgres://u:p@127.0.0.1:1/db").await.unwrap_err();
        assert!(matches!(err, Error::Database(sqlx::Error::Io(_))), "{err}");
        assert!(started.elapsed() < ACQUIRE_TIMEOUT);
    }
}
