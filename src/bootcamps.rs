//! Bootcamp controllers.
//!
//! Placeholders until bootcamps are persisted: each answers `200` with a
//! fixed message. Routes taking `:id` echo the raw path segment into the
//! message, unvalidated. Request bodies are ignored.

use crate::envelope::Envelope;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;

/// Mounted at `/api/v1/bootcamps`.
pub fn router() -> Router {
    Router::new()
        .get("/", get_bootcamps)
        .post("/", create_bootcamp)
        .get("/:id", get_bootcamp)
        .put("/:id", update_bootcamp)
        .delete("/:id", delete_bootcamp)
}

/// `GET /api/v1/bootcamps`, public.
pub async fn get_bootcamps(_req: Request) -> Json<Envelope> {
    Json(Envelope::success("Show all bootcamps"))
}

/// `GET /api/v1/bootcamps/:id`, public.
pub async fn get_bootcamp(req: Request) -> Json<Envelope> {
    Json(Envelope::success(format!("Show bootcamp {}", id(&req))))
}

/// `POST /api/v1/bootcamps`, private.
pub async fn create_bootcamp(_req: Request) -> Json<Envelope> {
    Json(Envelope::success("Create new bootcamp"))
}

/// `PUT /api/v1/bootcamps/:id`, private.
pub async fn update_bootcamp(req: Request) -> Json<Envelope> {
    Json(Envelope::success(format!("Update bootcamp {}", id(&req))))
}

/// `DELETE /api/v1/bootcamps/:id`, private.
pub async fn delete_bootcamp(req: Request) -> Json<Envelope> {
    Json(Envelope::success(format!("Delete bootcamp {}", id(&req))))
}

// Always bound: these handlers are only reachable through `/:id`.
fn id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}
