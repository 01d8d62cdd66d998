//! Message operations within a thread.

use serde_json::json;

use crate::client::Client;
use crate::error::{Result, TychoError};
use crate::types::{
    MessageFile, MessageParams, Metadata, Page, PageRequest, Role, ThreadMessage,
};

use super::{require_id, Collection};

/// Operations on the messages of one thread.
pub struct Messages<'a> {
    client: &'a Client,
    thread_id: String,
}

impl<'a> Messages<'a> {
    pub(crate) fn new(client: &'a Client, thread_id: String) -> Self {
        Self { client, thread_id }
    }

    fn collection(&self) -> Collection<'a, ThreadMessage> {
        Collection::new(self.client, format!("threads/{}/messages", self.thread_id))
    }

    /// Append a message to the thread. Only the `user` role can be created
    /// by callers; assistant messages are produced by runs.
    pub async fn create(&self, params: MessageParams) -> Result<ThreadMessage> {
        require_id("thread ID", &self.thread_id)?;
        if params.role != Role::User {
            return Err(TychoError::InvalidArgument(
                "only the 'user' role is supported for created messages".to_string(),
            ));
        }
        params.validate()?;
        self.collection().create(&params).await
    }

    pub async fn retrieve(&self, message_id: &str) -> Result<ThreadMessage> {
        require_id("thread ID", &self.thread_id)?;
        require_id("message ID", message_id)?;
        self.collection().retrieve(message_id).await
    }

    pub async fn modify(&self, message_id: &str, metadata: Metadata) -> Result<ThreadMessage> {
        require_id("thread ID", &self.thread_id)?;
        require_id("message ID", message_id)?;
        self.collection()
            .modify(message_id, &json!({ "metadata": metadata }))
            .await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<ThreadMessage>> {
        require_id("thread ID", &self.thread_id)?;
        self.collection().list(page).await
    }

    /// Files attached to one message.
    pub fn files(&self, message_id: impl Into<String>) -> MessageFiles<'a> {
        MessageFiles {
            client: self.client,
            thread_id: self.thread_id.clone(),
            message_id: message_id.into(),
        }
    }
}

/// Read-only operations on the files attached to a message.
pub struct MessageFiles<'a> {
    client: &'a Client,
    thread_id: String,
    message_id: String,
}

impl<'a> MessageFiles<'a> {
    fn collection(&self) -> Collection<'a, MessageFile> {
        Collection::new(
            self.client,
            format!(
                "threads/{}/messages/{}/files",
                self.thread_id, self.message_id
            ),
        )
    }

    pub async fn retrieve(&self, file_id: &str) -> Result<MessageFile> {
        require_id("thread ID", &self.thread_id)?;
        require_id("message ID", &self.message_id)?;
        require_id("file ID", file_id)?;
        self.collection().retrieve(file_id).await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<MessageFile>> {
        require_id("thread ID", &self.thread_id)?;
        require_id("message ID", &self.message_id)?;
        self.collection().list(page).await
    }
}
