//! Health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from load-balancer. |

use crate::envelope::Envelope;
use crate::request::Request;
use crate::response::Json;
use crate::status::Status;

/// Always `200 {"success":true,"message":"ok"}`.
pub async fn liveness(_req: Request) -> Json<Envelope> {
    Json(Envelope::success("ok"))
}

/// `200` when there is no database to wait for, or the configured one
/// answers a ping. `503` while it is still connecting or unreachable.
pub async fn readiness(req: Request) -> (Status, Json<Envelope>) {
    let ctx = req.context();
    if ctx.config().database_url.is_none() {
        return (Status::Ok, Json(Envelope::success("ready")));
    }
    let reachable = match ctx.database() {
        Some(db) => db.ping().await,
        None => false,
    };
    if reachable {
        (Status::Ok, Json(Envelope::success("ready")))
    } else {
        (Status::ServiceUnavailable, Json(Envelope::failure_with("database unavailable")))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::context::AppContext;
    use crate::response::IntoResponse;

    #[tokio::test]
    async fn ready_without_a_database() {
        let res = readiness(Request::new(http::Method::GET, "/readyz")).await.into_response();
        assert_eq!(res.status_code(), http::StatusCode::OK);
        assert_eq!(res.body(), br#"{"success":true,"message":"ready"}"#);
    }

    #[tokio::test]
    async fn not_ready_while_database_is_pending() {
        let config = Config {
            database_url: Some("postgres://localhost/devcamper".into()),
            ..Config::default()
        };
        let req = Request::new(http::Method::GET, "/readyz")
            .with_context(Arc::new(AppContext::new(config)));
        let res = readiness(req).await.into_response();
        assert_eq!(res.status_code(), http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn liveness_is_unconditional() {
        let res = liveness(Request::new(http::Method::GET, "/healthz")).await.into_response();
        assert_eq!(res.status_code(), http::StatusCode::OK);
    }
}
