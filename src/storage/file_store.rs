use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::MessageStore;
use crate::error::{AppError, AppResult};
use crate::models::Message;

/// Flat-file message log: the whole array lives in one JSON file that is
/// read and fully rewritten on every append. The mutex serializes the
/// read-modify-write cycles so concurrent posts cannot lose each other's
/// records.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// A missing file is an empty log, not an error.
    async fn read_all(&self) -> AppResult<Vec<Message>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::PersistenceError(format!(
                    "Failed to read message file: {e}"
                )));
            }
        };

        serde_json::from_str(&contents)
            .map_err(|e| AppError::PersistenceError(format!("Corrupt message file: {e}")))
    }

    async fn write_all(&self, messages: &[Message]) -> AppResult<()> {
        let contents = serde_json::to_string_pretty(messages)
            .map_err(|e| AppError::PersistenceError(format!("Failed to encode messages: {e}")))?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| AppError::PersistenceError(format!("Failed to write message file: {e}")))
    }
}

impl MessageStore for JsonFileStore {
    async fn append(&self, message: Message) -> AppResult<()> {
        let _guard = self.lock.lock().await;

        let mut messages = self.read_all().await?;
        messages.push(message);
        self.write_all(&messages).await
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Message>> {
        let _guard = self.lock.lock().await;

        Ok(self
            .read_all()
            .await?
            .into_iter()
            .filter(|m| m.user_id == user_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageSender;
    use chrono::Utc;

    fn message(id: &str, user_id: &str, content: &str) -> Message {
        Message {
            id: id.to_string(),
            user_id: user_id.to_string(),
            sender: MessageSender::User,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("messages.json"));

        assert!(store.list_by_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_and_list_preserves_order_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("messages.json"));

        store.append(message("1", "u1", "first")).await.unwrap();
        store.append(message("2", "u2", "other user")).await.unwrap();
        store.append(message("3", "u1", "second")).await.unwrap();

        let listed = store.list_by_user("u1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].content, "first");
        assert_eq!(listed[1].content, "second");
    }

    #[tokio::test]
    async fn test_file_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let store = JsonFileStore::new(&path);

        store.append(message("1", "u1", "hi")).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["userId"], "u1");
        assert_eq!(parsed[0]["sender"], "user");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);

        assert!(matches!(
            store.list_by_user("u1").await,
            Err(AppError::PersistenceError(_))
        ));
    }
}
