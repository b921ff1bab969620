use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub enum MessageSender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "upick")]
    Upick,
}

impl std::fmt::Display for MessageSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSender::User => write!(f, "user"),
            MessageSender::Upick => write!(f, "upick"),
        }
    }
}

impl std::str::FromStr for MessageSender {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "user" => Ok(MessageSender::User),
            "upick" => Ok(MessageSender::Upick),
            other => Err(AppError::InvalidRequest(format!(
                "sender must be \"user\" or \"upick\", got \"{other}\""
            ))),
        }
    }
}

/// One entry in the message log. Field names match the persisted JSON file,
/// so the wire format is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Millisecond UNIX timestamp at creation, as a string.
    pub id: String,
    pub user_id: String,
    pub sender: MessageSender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostMessageRequest {
    #[schema(example = "u1")]
    pub user_id: Option<String>,
    #[schema(example = "user")]
    pub sender: Option<String>,
    #[schema(example = "hi")]
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostMessageResponse {
    pub success: bool,
    pub message: Message,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    pub user_id: Option<String>,
}
