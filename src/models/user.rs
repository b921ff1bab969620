use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User row as stored in the Supabase `users` table. Created on a phone's
/// first successful verification, looked up by exact phone match after that.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    #[schema(example = "+15551234567")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponse {
    #[schema(example = "sent")]
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[schema(example = "+15551234567")]
    pub phone: Option<String>,
    #[schema(example = "123456")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub verified: bool,
    pub token: String,
}
