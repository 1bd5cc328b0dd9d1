//! Request logging.

use http::header::HOST;
use tracing::info;

use super::Middleware;
use crate::request::Request;

/// Logs `METHOD protocol://host/path?query` for every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn observe(&self, req: &Request) {
        info!(target: "devcamper::request", "{}", request_line(req));
    }
}

/// Formats the log line for `req`.
///
/// The host comes from the `Host` header, then the URI authority (HTTP/2
/// `:authority`, absolute-form targets), and is empty when neither is set.
///
/// ```rust
/// use devcamper::Request;
/// use devcamper::middleware::request_line;
/// use http::header::{HOST, HeaderValue};
///
/// let req = Request::new(http::Method::GET, "/api/v1/bootcamps?page=2")
///     .with_header(HOST, HeaderValue::from_static("localhost:3000"));
/// assert_eq!(request_line(&req), "GET http://localhost:3000/api/v1/bootcamps?page=2");
/// ```
pub fn request_line(req: &Request) -> String {
    let host = req
        .header(HOST.as_str())
        .or_else(|| req.authority())
        .unwrap_or_default();
    match req.query() {
        Some(query) => format!("{} http://{host}{}?{query}", req.method(), req.path()),
        None => format!("{} http://{host}{}", req.method(), req.path()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::HeaderValue;

    use super::*;
    use crate::{Router, Status};

    #[test]
    fn line_without_query() {
        let req = Request::new(http::Method::DELETE, "/api/v1/bootcamps/9")
            .with_header(HOST, HeaderValue::from_static("example.com"));
        assert_eq!(request_line(&req), "DELETE http://example.com/api/v1/bootcamps/9");
    }

    #[test]
    fn host_falls_back_to_uri_authority() {
        let (parts, ()) = http::Request::builder()
            .uri("http://api.example.com/api/v1/bootcamps")
            .body(())
            .unwrap()
            .into_parts();
        let req = Request::from_parts(parts, bytes::Bytes::new(), Arc::default());
        assert_eq!(request_line(&req), "GET http://api.example.com/api/v1/bootcamps");
    }

    #[test]
    fn host_header_wins_over_authority() {
        let req = Request::new(http::Method::GET, "http://api.example.com/")
            .with_header(HOST, HeaderValue::from_static("localhost:3000"));
        assert_eq!(request_line(&req), "GET http://localhost:3000/");
    }

    #[test]
    fn line_without_host() {
        let req = Request::new(http::Method::GET, "/");
        assert_eq!(request_line(&req), "GET http:///");
    }

    #[tokio::test]
    async fn middleware_runs_for_matched_and_unmatched_requests() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let router = Router::new()
            .layer(RequestLogger)
            .layer(move |_req: &Request| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .get("/", |_req: Request| async { Status::Ok });

        let ok = router.call(Request::new(http::Method::GET, "/")).await;
        let missing = router.call(Request::new(http::Method::GET, "/missing")).await;

        assert_eq!(ok.status_code(), http::StatusCode::OK);
        assert_eq!(missing.status_code(), http::StatusCode::NOT_FOUND);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
