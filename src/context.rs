//! Process-wide application context.
//!
//! Built once in `main`, wrapped in an `Arc`, handed to the [`Server`], and
//! attached to every [`Request`]. Nothing here is mutated after startup
//! except the one-shot database slot.
//!
//! [`Server`]: crate::Server
//! [`Request`]: crate::Request

use tokio::sync::OnceCell;

use crate::config::Config;
use crate::db::Database;

#[derive(Debug)]
pub struct AppContext {
    config: Config,
    database: OnceCell<Database>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self { config, database: OnceCell::new() }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The database handle, once startup has connected it.
    pub fn database(&self) -> Option<&Database> {
        self.database.get()
    }

    /// Stores the database handle. Returns it back if one was already set.
    pub fn set_database(&self, database: Database) -> Result<(), Database> {
        self.database.set(database).map_err(|e| match e {
            tokio::sync::SetError::AlreadyInitializedError(db)
            | tokio::sync::SetError::InitializingError(db) => db,
        })
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
