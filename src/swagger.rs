use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::auth::send_otp,
        handlers::auth::verify_otp,
        handlers::message::list_messages,
        handlers::message::post_message,
    ),
    components(
        schemas(
            User,
            SendOtpRequest,
            SendOtpResponse,
            VerifyOtpRequest,
            VerifyOtpResponse,
            Message,
            MessageSender,
            PostMessageRequest,
            PostMessageResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "auth", description = "Phone verification and session tokens"),
        (name = "messages", description = "Per-user message log")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
