//! HTTP server and graceful shutdown.
//!
//! On shutdown (SIGTERM, Ctrl-C, or the future given to
//! [`Server::serve_with_shutdown`]) the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Tells every open connection to finish its in-flight request and close.
//! 3. Waits up to [`GRACE_PERIOD`] for them, then returns.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::context::AppContext;
use crate::error::Result;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// How long in-flight connections get to finish once shutdown starts.
pub const GRACE_PERIOD: Duration = Duration::from_secs(30);

enum Listener {
    Addr(SocketAddr),
    Bound(TcpListener),
}

/// The HTTP server.
pub struct Server {
    listener: Listener,
}

impl Server {
    /// Binds `addr` when [`serve`](Server::serve) is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { listener: Listener::Addr(addr) }
    }

    /// Serves on an already-bound listener.
    pub fn listen(listener: TcpListener) -> Self {
        Self { listener: Listener::Bound(listener) }
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then shuts down gracefully.
    pub async fn serve(self, router: Router, context: Arc<AppContext>) -> Result<()> {
        self.serve_with_shutdown(router, context, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then shuts down gracefully.
    pub async fn serve_with_shutdown<F>(
        self,
        router: Router,
        context: Arc<AppContext>,
        signal: F,
    ) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = match self.listener {
            Listener::Addr(addr) => TcpListener::bind(addr).await?,
            Listener::Bound(listener) => listener,
        };
        let addr = listener.local_addr()?;
        let router = Arc::new(router);
        let builder = ConnBuilder::new(TokioExecutor::new());
        let graceful = GracefulShutdown::new();

        info!(%addr, "listening");

        tokio::pin!(signal);

        loop {
            tokio::select! {
                biased;

                () = &mut signal => {
                    info!("shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let context = Arc::clone(&context);
                    let svc = service_fn(move |req| {
                        dispatch(Arc::clone(&router), Arc::clone(&context), req)
                    });

                    // HTTP/1.1 or HTTP/2, whichever the client speaks.
                    let conn = builder.serve_connection(TokioIo::new(stream), svc).into_owned();
                    let conn = graceful.watch(conn);

                    tokio::spawn(async move {
                        if let Err(e) = conn.await {
                            debug!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }
            }
        }

        drop(listener);

        tokio::select! {
            () = graceful.shutdown() => info!("all connections closed"),
            () = tokio::time::sleep(GRACE_PERIOD) => {
                warn!(grace_period = ?GRACE_PERIOD, "connections still open after grace period");
            }
        }

        info!("server stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// Infallible: every failure becomes a status code, so hyper never sees an
/// error.
async fn dispatch(
    router: Arc<Router>,
    context: Arc<AppContext>,
    req: hyper::Request<Incoming>,
) -> std::result::Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!("failed to read request body: {e}");
            return Ok(Response::status(Status::BadRequest).into_inner());
        }
    };

    let response = router.call(Request::from_parts(parts, body, context)).await;
    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). On Windows only Ctrl-C
/// is available.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
