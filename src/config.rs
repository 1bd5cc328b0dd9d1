//! Environment configuration.
//!
//! Values come from the process environment, after `config/config.env` has
//! been merged into it with [`dotenvy`]. Variables already present in the
//! environment win over the file. Empty values count as unset.
//!
//! | Variable | Type | Default |
//! |---|---|---|
//! | `HOST` | IP address | `0.0.0.0` |
//! | `PORT` | `u16` | `3000` |
//! | `NODE_ENV` | string | `development` |
//! | `DATABASE_URL` | PostgreSQL URL | unset, no database |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;

use crate::error::{Error, Result};

/// Where [`Config::load`] looks for the dotenv file.
pub const DEFAULT_ENV_FILE: &str = "config/config.env";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NODE_ENV: &str = "development";

/// Resolved process configuration. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub node_env: String,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            node_env: DEFAULT_NODE_ENV.to_owned(),
            database_url: None,
        }
    }
}

impl Config {
    /// Loads [`DEFAULT_ENV_FILE`] (if present) and reads the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_ENV_FILE)
    }

    /// Like [`Config::load`], with an explicit dotenv path. A missing file is
    /// fine; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match dotenvy::from_path(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "loaded env file"),
            Err(e) if e.not_found() => {
                tracing::debug!(path = %path.display(), "no env file, using process environment");
            }
            Err(source) => {
                return Err(Error::EnvFile { path: path.display().to_string(), source });
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = match get("HOST") {
            Some(raw) => raw.trim().parse().map_err(|e: std::net::AddrParseError| Error::Config {
                key: "HOST",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.host,
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| Error::Config {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.port,
        };

        Ok(Self {
            host,
            port,
            node_env: get("NODE_ENV").unwrap_or(defaults.node_env),
            database_url: get("DATABASE_URL"),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Request logging is switched on only in development.
    pub fn is_development(&self) -> bool {
        self.node_env == DEFAULT_NODE_ENV
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.port, 3000);
        assert!(cfg.is_development());
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "5000"),
            ("NODE_ENV", "production"),
            ("DATABASE_URL", "postgres://localhost/devcamper"),
        ])
        .unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:5000");
        assert!(!cfg.is_development());
        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/devcamper"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = config(&[("PORT", ""), ("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.database_url, None);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "PORT", .. }), "{err}");
    }

    #[test]
    fn rejects_bad_host() {
        let err = config(&[("HOST", "not-an-ip")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "HOST", .. }), "{err}");
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        assert!(Config::load_from("does/not/exist.env").is_ok());
    }
}
