use chrono::Utc;

use super::required_field;
use crate::error::AppResult;
use crate::models::*;
use crate::storage::MessageStore;

#[derive(Clone)]
pub struct MessageService<S> {
    store: S,
}

impl<S: MessageStore> MessageService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full matching set, storage order (oldest first). No pagination.
    pub async fn list_messages(&self, user_id: Option<String>) -> AppResult<Vec<Message>> {
        let user_id = required_field(user_id, "userId")?;
        self.store.list_by_user(&user_id).await
    }

    pub async fn post_message(&self, request: PostMessageRequest) -> AppResult<Message> {
        let user_id = required_field(request.user_id, "userId")?;
        let sender: MessageSender = required_field(request.sender, "sender")?.parse()?;
        let content = required_field(request.content, "content")?;

        let now = Utc::now();
        let message = Message {
            id: now.timestamp_millis().to_string(),
            user_id,
            sender,
            content,
            timestamp: now,
        };

        self.store.append(message.clone()).await?;

        log::info!("Message {} stored for {}", message.id, message.user_id);
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::memory::MemoryStore;

    fn request(user_id: &str, sender: &str, content: &str) -> PostMessageRequest {
        PostMessageRequest {
            user_id: Some(user_id.to_string()),
            sender: Some(sender.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_post_then_list_round_trip() {
        let service = MessageService::new(MemoryStore::default());

        let posted = service.post_message(request("u1", "user", "hi")).await.unwrap();
        assert_eq!(posted.sender, MessageSender::User);

        let listed = service.list_messages(Some("u1".to_string())).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "hi");
        assert_eq!(listed[0].id, posted.id);
    }

    #[tokio::test]
    async fn test_list_filters_by_user_and_keeps_post_order() {
        let service = MessageService::new(MemoryStore::default());

        service.post_message(request("u1", "user", "one")).await.unwrap();
        service.post_message(request("u2", "upick", "noise")).await.unwrap();
        service.post_message(request("u1", "upick", "two")).await.unwrap();

        let listed = service.list_messages(Some("u1".to_string())).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].content, "one");
        assert_eq!(listed[1].content, "two");
        assert_eq!(listed[1].sender, MessageSender::Upick);
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let service = MessageService::new(MemoryStore::default());

        let result = service.list_messages(None).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let result = service
            .post_message(PostMessageRequest {
                user_id: Some("u1".to_string()),
                sender: Some("user".to_string()),
                content: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        assert!(service
            .list_messages(Some("u1".to_string()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_unknown_sender_is_rejected() {
        let service = MessageService::new(MemoryStore::default());

        let result = service.post_message(request("u1", "admin", "hi")).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
