use actix_web::{HttpResponse, ResponseError, Result, web};

use crate::models::*;
use crate::services::AppAuthService;

#[utoipa::path(
    post,
    path = "/send-otp",
    tag = "auth",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "OTP dispatched", body = SendOtpResponse),
        (status = 400, description = "Phone number missing"),
        (status = 502, description = "Verification provider failed")
    )
)]
pub async fn send_otp(
    auth_service: web::Data<AppAuthService>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse> {
    match auth_service.send_otp(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/verify-otp",
    tag = "auth",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Code approved, session token issued", body = VerifyOtpResponse),
        (status = 400, description = "Missing fields or code rejected"),
        (status = 500, description = "User datastore failed"),
        (status = 502, description = "Verification provider failed")
    )
)]
pub async fn verify_otp(
    auth_service: web::Data<AppAuthService>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse> {
    match auth_service.verify_otp(request.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/send-otp", web::post().to(send_otp))
        .route("/verify-otp", web::post().to(verify_otp));
}
