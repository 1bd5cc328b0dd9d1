//! Unified error type.

/// The error type returned by devcamper's fallible operations.
///
/// Application-level outcomes (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: reading configuration, binding to a port,
/// accepting a connection, or reaching the database.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration value `{value}` for {key}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("failed to load {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
