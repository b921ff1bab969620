use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        // verify-otp has a documented rejection body of its own
        if let AppError::InvalidCode = self {
            log::warn!("Invalid verification code");
            return HttpResponse::BadRequest().json(json!({
                "verified": false,
                "message": "Invalid code"
            }));
        }

        let (status_code, error_code, message) = match self {
            AppError::InvalidRequest(msg) => {
                log::warn!("Invalid request: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "INVALID_REQUEST",
                    msg.clone(),
                )
            }
            AppError::ProviderError(msg) => {
                log::error!("Provider error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "Verification provider request failed".to_string(),
                )
            }
            AppError::PersistenceError(msg) => {
                log::error!("Persistence error: {msg}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "Storage operation failed".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
