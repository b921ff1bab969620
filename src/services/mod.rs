pub mod auth_service;
pub mod message_service;

pub use auth_service::AuthService;
pub use message_service::MessageService;

use crate::error::{AppError, AppResult};
use crate::external::{SupabaseClient, TwilioVerifyService};
use crate::storage::JsonFileStore;

/// Concrete service types wired up in `main`.
pub type AppAuthService = AuthService<TwilioVerifyService, SupabaseClient>;
pub type AppMessageService = MessageService<JsonFileStore>;

/// Missing and blank fields are both client errors; nothing external is
/// called before this check passes.
pub(crate) fn required_field(value: Option<String>, name: &str) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::InvalidRequest(format!("{name} is required"))),
    }
}
