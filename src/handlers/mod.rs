pub mod auth;
pub mod message;

pub use auth::auth_config;
pub use message::message_config;

use actix_web::{HttpResponse, Result};

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Liveness probe", body = String)
    )
)]
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().body("Backend is running"))
}
