//! # devcamper
//!
//! The DevCamper bootcamp API: JSON CRUD endpoints under `/api/v1/bootcamps`
//! served over hyper, with an optional PostgreSQL bootstrap.
//!
//! The bootcamp handlers are placeholders that answer with a fixed
//! [`Envelope`]. What is real is the plumbing around them:
//!
//! - Ordered routing with `:name` path parameters ([`Router`])
//! - Passthrough middleware, including a development request logger
//! - Environment configuration from `config/config.env` ([`Config`])
//! - A shared [`AppContext`] instead of process-wide globals
//! - Graceful shutdown on SIGTERM / Ctrl-C ([`Server`])
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use devcamper::{AppContext, Config, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), devcamper::Error> {
//!     let config = Config::load()?;
//!     let app = routes::app(&config);
//!     let server = Server::bind(config.socket_addr());
//!     server.serve(app, Arc::new(AppContext::new(config))).await
//! }
//! ```
//!
//! ## Writing a handler
//!
//! ```rust
//! use devcamper::{Envelope, Json, Request, Router};
//!
//! async fn get_course(req: Request) -> Json<Envelope> {
//!     let id = req.param("id").unwrap_or_default();
//!     Json(Envelope::success(format!("Show course {id}")))
//! }
//!
//! let app = Router::new().get("/api/v1/courses/:id", get_course);
//! ```

mod context;
mod envelope;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod bootcamps;
pub mod config;
pub mod db;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod startup;
pub mod telemetry;

pub use config::Config;
pub use context::AppContext;
pub use db::Database;
pub use envelope::Envelope;
pub use error::{Error, Result};
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{GRACE_PERIOD, Server, shutdown_signal};
pub use status::Status;
