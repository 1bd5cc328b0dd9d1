//! Process startup: serve, bootstrap the database, and stop on failure.
//!
//! The server starts accepting as soon as the listener is bound. The database
//! connects concurrently; if it is rejected the server drains as it would on
//! SIGTERM and [`run`] returns the database error.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::config::Config;
use crate::context::AppContext;
use crate::db::Database;
use crate::error::{Error, Result};
use crate::routes;
use crate::server::{Server, shutdown_signal};

/// Runs the application on `listener` until SIGTERM / Ctrl-C or a fatal
/// bootstrap error.
pub async fn run(config: Config, listener: TcpListener) -> Result<()> {
    run_with_shutdown(config, listener, shutdown_signal()).await
}

/// Like [`run`], stopping when `signal` resolves instead of on OS signals.
pub async fn run_with_shutdown<F>(config: Config, listener: TcpListener, signal: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::app(&config);
    let context = Arc::new(AppContext::new(config));

    info!("{}", running_message(context.config(), listener.local_addr()?));

    let (fatal_tx, fatal_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        tokio::select! {
            () = signal => {}
            Ok(()) = fatal_rx => {}
        }
    };
    let mut server = tokio::spawn(
        Server::listen(listener).serve_with_shutdown(app, Arc::clone(&context), shutdown),
    );

    // A signal during the bootstrap drops the pending connect.
    let bootstrap = tokio::select! {
        res = connect_database(&context) => res,
        joined = &mut server => return flatten(joined),
    };
    if bootstrap.is_err() {
        let _ = fatal_tx.send(());
    }

    flatten(server.await)?;
    bootstrap
}

/// The startup log line. Uses the bound address so `PORT=0` reports the
/// port actually chosen.
pub fn running_message(config: &Config, addr: SocketAddr) -> String {
    format!("Server is running in {} mode on port {}", config.node_env, addr.port())
}

async fn connect_database(context: &AppContext) -> Result<()> {
    let Some(url) = context.config().database_url.as_deref() else {
        info!("DATABASE_URL not set, running without a database");
        return Ok(());
    };

    let database = Database::connect(url).await?;
    info!("Database connected: {}", database.host());
    if context.set_database(database).is_err() {
        warn!("database handle was already set, keeping the first one");
    }
    Ok(())
}

fn flatten(joined: std::result::Result<Result<()>, tokio::task::JoinError>) -> Result<()> {
    joined.map_err(|e| Error::Io(std::io::Error::other(e)))?
}
