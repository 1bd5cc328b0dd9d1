//! Middleware layer.
//!
//! A middleware sees every request before the router matches it. It can
//! look but not answer: [`Middleware::observe`] returns nothing, so control
//! always continues to the matched handler or the fallback.
//!
//! Built-in middleware:
//! - [`RequestLogger`]: one log line per request, enabled in development.

mod logger;

pub use logger::{RequestLogger, request_line};

use crate::request::Request;

/// A passthrough hook run before dispatch.
pub trait Middleware: Send + Sync + 'static {
    fn observe(&self, req: &Request);
}

impl<F> Middleware for F
where
    F: Fn(&Request) + Send + Sync + 'static,
{
    fn observe(&self, req: &Request) {
        self(req)
    }
}
