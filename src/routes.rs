//! Application routes.

use crate::bootcamps;
use crate::config::Config;
use crate::envelope::Envelope;
use crate::health;
use crate::middleware::RequestLogger;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::status::Status;

pub const BOOTCAMPS_PATH: &str = "/api/v1/bootcamps";

/// Builds the full router for `config`.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/` | [`root`] |
/// | GET | `/healthz` | [`health::liveness`] |
/// | GET | `/readyz` | [`health::readiness`] |
/// | GET, POST | `/api/v1/bootcamps` | [`bootcamps`] |
/// | GET, PUT, DELETE | `/api/v1/bootcamps/:id` | [`bootcamps`] |
///
/// Everything else gets the router's JSON 404. Requests are logged when
/// running in development.
pub fn app(config: &Config) -> Router {
    let router = Router::new()
        .get("/", root)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .nest(BOOTCAMPS_PATH, bootcamps::router());

    if config.is_development() {
        router.layer(RequestLogger)
    } else {
        router
    }
}

/// `GET /`: there is nothing at the root, answer `400 {"success":false}`.
pub async fn root(_req: Request) -> (Status, Json<Envelope>) {
    (Status::BadRequest, Json(Envelope::failure()))
}
