pub mod file_store;

pub use file_store::JsonFileStore;

use std::future::Future;

use crate::error::AppResult;
use crate::models::Message;

/// Message log capability: append a record, list records for one user in
/// insertion order. Injected into `MessageService` so tests can run against
/// an in-memory store.
pub trait MessageStore {
    fn append(&self, message: Message) -> impl Future<Output = AppResult<()>> + Send;

    fn list_by_user(&self, user_id: &str) -> impl Future<Output = AppResult<Vec<Message>>> + Send;
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::{Arc, Mutex};

    use super::MessageStore;
    use crate::error::AppResult;
    use crate::models::Message;

    /// In-memory message log for tests.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        messages: Arc<Mutex<Vec<Message>>>,
    }

    impl MessageStore for MemoryStore {
        async fn append(&self, message: Message) -> AppResult<()> {
            self.messages.lock().unwrap().push(message);
            Ok(())
        }

        async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Message>> {
            Ok(self
                .messages
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect())
        }
    }
}
