use reqwest::Client;
use serde_json::json;

use super::UserStore;
use crate::config::SupabaseConfig;
use crate::error::{AppError, AppResult};
use crate::models::User;

/// Supabase PostgREST client for the `users` table.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn users_url(&self) -> String {
        format!("{}/rest/v1/users", self.config.url.trim_end_matches('/'))
    }
}

impl UserStore for SupabaseClient {
    async fn find_by_phone(&self, phone: &str) -> AppResult<Option<User>> {
        let response = self
            .client
            .get(self.users_url())
            .query(&[
                ("select", "id,phone"),
                ("phone", &format!("eq.{phone}")),
                ("limit", "2"),
            ])
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(|e| AppError::PersistenceError(format!("User lookup failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PersistenceError(format!(
                "User lookup failed ({status}): {error_text}"
            )));
        }

        let mut users: Vec<User> = response
            .json()
            .await
            .map_err(|e| AppError::PersistenceError(format!("Invalid users response: {e}")))?;

        if users.len() > 1 {
            // The phone column is supposed to be unique; that invariant
            // belongs to the datastore schema.
            log::warn!("Multiple user rows for the same phone, using the first");
        }

        Ok(if users.is_empty() {
            None
        } else {
            Some(users.swap_remove(0))
        })
    }

    async fn create(&self, phone: &str) -> AppResult<User> {
        let response = self
            .client
            .post(self.users_url())
            .header("apikey", &self.config.service_key)
            .bearer_auth(&self.config.service_key)
            .header("Prefer", "return=representation")
            .json(&json!([{ "phone": phone }]))
            .send()
            .await
            .map_err(|e| AppError::PersistenceError(format!("User insert failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::PersistenceError(format!(
                "User insert failed ({status}): {error_text}"
            )));
        }

        let mut users: Vec<User> = response
            .json()
            .await
            .map_err(|e| AppError::PersistenceError(format!("Invalid insert response: {e}")))?;

        if users.is_empty() {
            return Err(AppError::PersistenceError(
                "User insert returned no rows".to_string(),
            ));
        }

        Ok(users.swap_remove(0))
    }
}
