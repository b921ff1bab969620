use super::required_field;
use crate::error::{AppError, AppResult};
use crate::external::{UserStore, VerificationProvider};
use crate::models::*;
use crate::utils::JwtService;

/// Orchestrates the verification-to-session handshake:
/// OTP request -> OTP check -> user lookup-or-create -> token issuance.
/// Every step awaits one external call and surfaces its failure directly;
/// there are no retries and no local verification state.
#[derive(Clone)]
pub struct AuthService<P, U> {
    provider: P,
    users: U,
    jwt_service: JwtService,
}

impl<P: VerificationProvider, U: UserStore> AuthService<P, U> {
    pub fn new(provider: P, users: U, jwt_service: JwtService) -> Self {
        Self {
            provider,
            users,
            jwt_service,
        }
    }

    /// Dispatches a one-time code to `phone`. Not idempotent: calling twice
    /// sends two codes, racing per provider semantics.
    pub async fn send_otp(&self, request: SendOtpRequest) -> AppResult<SendOtpResponse> {
        let phone = required_field(request.phone, "phone")?;

        self.provider.start_verification(&phone).await?;

        log::info!("OTP sent to {phone}");
        Ok(SendOtpResponse {
            status: "sent".to_string(),
        })
    }

    /// Checks the code with the provider, resolves the user record for the
    /// phone (creating it on first verification) and issues the session
    /// token. Any verdict other than exactly "approved" stops the handshake
    /// before the user lookup.
    pub async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<VerifyOtpResponse> {
        let phone = required_field(request.phone, "phone")?;
        let code = required_field(request.code, "code")?;

        let verdict = self.provider.check_verification(&phone, &code).await?;
        if verdict != "approved" {
            log::warn!("Verification for {phone} not approved: {verdict}");
            return Err(AppError::InvalidCode);
        }

        let user = match self.users.find_by_phone(&phone).await? {
            Some(user) => user,
            None => {
                let user = self.users.create(&phone).await?;
                log::info!("New user {} created for {phone}", user.id);
                user
            }
        };

        let token = self.jwt_service.generate_session_token(user.id, &user.phone)?;

        log::info!("Session token issued for {phone}");
        Ok(VerifyOtpResponse {
            verified: true,
            token,
        })
    }
}
