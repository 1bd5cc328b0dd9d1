//! Ordered request router.
//!
//! Routes are kept in registration order as compiled patterns: a list of
//! literal or capture segments. Dispatch walks the list and the first route
//! whose method and segments match wins. Registration order is the only
//! tie-break, so `/bootcamps/radius` registered before `/bootcamps/:id` shadows
//! it for that one path, and registered after it is never reached.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::envelope::Envelope;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::{Json, Response};
use crate::status::Status;

// ── Patterns ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route path such as `/api/v1/bootcamps/:id`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compiles `path`.
    ///
    /// # Panics
    ///
    /// On an empty segment (`/a//b`), an empty parameter name (`/:`), or a
    /// parameter name used twice. Routes are registered at startup, so a bad
    /// pattern is a programming error.
    pub(crate) fn parse(path: &str) -> Self {
        let mut seen = HashSet::new();
        let segments = split(path)
            .into_iter()
            .map(|raw| match raw.strip_prefix(':') {
                Some("") => panic!("invalid route `{path}`: unnamed parameter"),
                Some(name) => {
                    if !seen.insert(name) {
                        panic!("invalid route `{path}`: duplicate parameter `{name}`");
                    }
                    Segment::Param(name.to_owned())
                }
                None if raw.is_empty() => panic!("invalid route `{path}`: empty segment"),
                None => Segment::Literal(raw.to_owned()),
            })
            .collect();
        Self { segments }
    }

    /// `prefix` followed by `self`, re-checked for duplicate names.
    fn prefixed(&self, prefix: &Pattern) -> Self {
        let joined = Self {
            segments: prefix.segments.iter().chain(&self.segments).cloned().collect(),
        };
        let mut seen = HashSet::new();
        for segment in &joined.segments {
            if let Segment::Param(name) = segment {
                assert!(seen.insert(name), "invalid route `{joined}`: duplicate parameter `{name}`");
            }
        }
        joined
    }

    /// Binds every parameter if `path` matches segment-for-segment.
    pub(crate) fn matches(&self, path: &[&str]) -> Option<HashMap<String, String>> {
        if path.len() != self.segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(lit) if lit == value => {}
                Segment::Param(name) if !value.is_empty() => {
                    params.insert(name.clone(), (*value).to_owned());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => write!(f, "/{lit}")?,
                Segment::Param(name) => write!(f, "/:{name}")?,
            }
        }
        Ok(())
    }
}

/// Splits a path into segments. The leading `/` and one trailing `/` are
/// dropped, so `/` is zero segments and `/a/` equals `/a`.
pub(crate) fn split(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

struct Route {
    method: Method,
    pattern: Pattern,
    handler: BoxedHandler,
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every builder method returns `self` so registrations chain.
pub struct Router {
    routes: Vec<Route>,
    middleware: Vec<Arc<dyn Middleware>>,
    fallback: BoxedHandler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            middleware: Vec::new(),
            fallback: not_found.into_boxed_handler(),
        }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `:name` syntax and `req.param("name")` retrieves
    /// them:
    ///
    /// ```rust
    /// # use devcamper::{Method, Request, Response, Router};
    /// # async fn get_bootcamp(_: Request) -> Response { Response::text("") }
    /// # async fn create_bootcamp(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get,  "/bootcamps/:id", get_bootcamp)
    ///     .on(Method::Post, "/bootcamps",     create_bootcamp);
    /// ```
    ///
    /// # Panics
    ///
    /// If `path` is not a valid pattern (see module docs).
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes.push(Route {
            method,
            pattern: Pattern::parse(path),
            handler: handler.into_boxed_handler(),
        });
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    /// Mounts the routes of `router` under `prefix`, after the routes
    /// already registered here and in their original order. Only routes are
    /// carried over; the nested router's middleware and fallback are dropped.
    pub fn nest(mut self, prefix: &str, router: Router) -> Self {
        let prefix = Pattern::parse(prefix);
        self.routes.extend(router.routes.into_iter().map(|route| Route {
            pattern: route.pattern.prefixed(&prefix),
            ..route
        }));
        self
    }

    /// Appends a middleware. Middleware runs in insertion order, before
    /// matching, for every request including unmatched ones.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Replaces the handler used when no route matches.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = handler.into_boxed_handler();
        self
    }

    /// Registered `(method, pattern)` pairs, in matching order.
    pub fn routes(&self) -> impl Iterator<Item = (Method, String)> + '_ {
        self.routes.iter().map(|r| (r.method, r.pattern.to_string()))
    }

    /// Runs middleware, matches, and invokes exactly one handler: the first
    /// matching route's, or the fallback.
    pub async fn call(&self, mut req: Request) -> Response {
        for middleware in &self.middleware {
            middleware.observe(&req);
        }

        let handler = match self.lookup(&req.method, &req.path) {
            Some((handler, params)) => {
                req.params = params;
                handler
            }
            None => &self.fallback,
        };
        handler.call(req).await
    }

    fn lookup(
        &self,
        method: &http::Method,
        path: &str,
    ) -> Option<(&BoxedHandler, HashMap<String, String>)> {
        let method = Method::try_from(method).ok()?;
        let segments = split(path);
        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| route.pattern.matches(&segments).map(|p| (&route.handler, p)))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Default fallback: `404 {"success":false,"message":"Route not found"}`.
async fn not_found(_req: Request) -> (Status, Json<Envelope>) {
    (Status::NotFound, Json(Envelope::failure_with("Route not found")))
}
