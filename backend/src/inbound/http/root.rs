//! Unauthenticated index route.

use actix_web::{HttpResponse, get};

#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Plain-text greeting `root.`", body = String))
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("root.")
}
