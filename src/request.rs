//! Incoming HTTP request type.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Version};

use crate::context::AppContext;

/// An incoming HTTP request, as seen by middleware and handlers.
///
/// `method` is the raw token so that requests with methods the router does
/// not know still flow through middleware and reach the not-found fallback.
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) authority: Option<String>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) version: Version,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) context: Arc<AppContext>,
}

impl Request {
    /// Builds a request by hand, mostly for tests. `target` may carry a query,
    /// and may be absolute (`http://host/path`).
    ///
    /// ```rust
    /// use devcamper::Request;
    ///
    /// let req = Request::new(http::Method::GET, "/api/v1/bootcamps?page=2");
    /// assert_eq!(req.path(), "/api/v1/bootcamps");
    /// assert_eq!(req.query(), Some("page=2"));
    ///
    /// let req = Request::new(http::Method::GET, "http://api.example.com/api/v1/bootcamps");
    /// assert_eq!(req.authority(), Some("api.example.com"));
    /// assert_eq!(req.path(), "/api/v1/bootcamps");
    /// ```
    pub fn new(method: http::Method, target: &str) -> Self {
        let (authority, path, query) = match target.parse::<http::Uri>() {
            Ok(uri) => (
                uri.authority().map(|a| a.as_str().to_owned()),
                uri.path().to_owned(),
                uri.query().map(str::to_owned),
            ),
            Err(_) => match target.split_once('?') {
                Some((p, q)) => (None, p.to_owned(), Some(q.to_owned())),
                None => (None, target.to_owned(), None),
            },
        };
        Self {
            method,
            authority,
            path,
            query,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            params: HashMap::new(),
            context: Arc::new(AppContext::default()),
        }
    }

    pub(crate) fn from_parts(
        parts: http::request::Parts,
        body: Bytes,
        context: Arc<AppContext>,
    ) -> Self {
        Self {
            method: parts.method,
            authority: parts.uri.authority().map(|a| a.as_str().to_owned()),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            version: parts.version,
            headers: parts.headers,
            body,
            params: HashMap::new(),
            context,
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_context(mut self, context: Arc<AppContext>) -> Self {
        self.context = context;
        self
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }

    /// The URI authority: set for HTTP/2 (`:authority`) and for absolute-form
    /// HTTP/1.1 targets, `None` for the usual origin-form requests.
    pub fn authority(&self) -> Option<&str> { self.authority.as_deref() }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn version(&self) -> Version { self.version }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn context(&self) -> &AppContext { &self.context }

    /// Header lookup. Names are case-insensitive; non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/bootcamps/:id`, `req.param("id")` on `/bootcamps/42`
    /// returns `Some("42")`. The value is the raw path segment, not
    /// percent-decoded.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }
}
