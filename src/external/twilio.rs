use reqwest::Client;
use serde::Deserialize;

use super::VerificationProvider;
use crate::config::TwilioConfig;
use crate::error::{AppError, AppResult};

const VERIFY_BASE_URL: &str = "https://verify.twilio.com/v2";

#[derive(Debug, Deserialize)]
pub struct VerificationResponse {
    pub sid: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct VerificationCheckResponse {
    pub status: String,
}

/// Twilio Verify v2 client. Code generation, delivery and comparison all
/// happen on Twilio's side; each call here is billed to the account.
#[derive(Clone)]
pub struct TwilioVerifyService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioVerifyService {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

impl VerificationProvider for TwilioVerifyService {
    async fn start_verification(&self, phone: &str) -> AppResult<()> {
        let url = format!(
            "{}/Services/{}/Verifications",
            VERIFY_BASE_URL, self.config.verify_service_sid
        );

        let params = [("To", phone), ("Channel", "sms")];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("Verification request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Twilio rejected verification for {phone} ({status}): {error_text}");
            return Err(AppError::ProviderError(format!(
                "Verification start failed: {error_text}"
            )));
        }

        let verification: VerificationResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("Invalid Twilio response: {e}")))?;

        log::info!(
            "Verification {} started for {phone}, status: {}",
            verification.sid,
            verification.status
        );
        Ok(())
    }

    async fn check_verification(&self, phone: &str, code: &str) -> AppResult<String> {
        let url = format!(
            "{}/Services/{}/VerificationCheck",
            VERIFY_BASE_URL, self.config.verify_service_sid
        );

        let params = [("To", phone), ("Code", code)];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(format!("Verification check failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Twilio verification check failed for {phone} ({status}): {error_text}");
            return Err(AppError::ProviderError(format!(
                "Verification check failed: {error_text}"
            )));
        }

        let check: VerificationCheckResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("Invalid Twilio response: {e}")))?;

        log::info!("Verification check for {phone}, status: {}", check.status);
        Ok(check.status)
    }
}
