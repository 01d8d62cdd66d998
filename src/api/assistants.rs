//! Assistant operations.

use serde_json::json;

use crate::client::Client;
use crate::error::Result;
use crate::types::{Assistant, AssistantFile, AssistantParams, Deleted, Page, PageRequest};

use super::{require_id, Collection};

/// Operations on assistants.
pub struct Assistants<'a> {
    client: &'a Client,
}

impl<'a> Assistants<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<'a, Assistant> {
        Collection::new(self.client, "assistants")
    }

    pub async fn create(&self, params: AssistantParams) -> Result<Assistant> {
        require_id("model", &params.model)?;
        self.collection().create(&params).await
    }

    pub async fn retrieve(&self, assistant_id: &str) -> Result<Assistant> {
        require_id("assistant ID", assistant_id)?;
        self.collection().retrieve(assistant_id).await
    }

    pub async fn modify(&self, assistant_id: &str, params: AssistantParams) -> Result<Assistant> {
        require_id("assistant ID", assistant_id)?;
        self.collection().modify(assistant_id, &params).await
    }

    pub async fn delete(&self, assistant_id: &str) -> Result<Option<Deleted>> {
        require_id("assistant ID", assistant_id)?;
        self.collection().delete(assistant_id).await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<Assistant>> {
        self.collection().list(page).await
    }

    /// Files attached to one assistant.
    pub fn files(&self, assistant_id: impl Into<String>) -> AssistantFiles<'a> {
        AssistantFiles {
            client: self.client,
            assistant_id: assistant_id.into(),
        }
    }
}

/// Operations on the files attached to an assistant.
pub struct AssistantFiles<'a> {
    client: &'a Client,
    assistant_id: String,
}

impl<'a> AssistantFiles<'a> {
    fn collection(&self) -> Collection<'a, AssistantFile> {
        Collection::new(
            self.client,
            format!("assistants/{}/files", self.assistant_id),
        )
    }

    /// Attach an already-uploaded file to the assistant.
    pub async fn attach(&self, file_id: &str) -> Result<AssistantFile> {
        require_id("assistant ID", &self.assistant_id)?;
        require_id("file ID", file_id)?;
        self.collection().create(&json!({ "file_id": file_id })).await
    }

    pub async fn retrieve(&self, file_id: &str) -> Result<AssistantFile> {
        require_id("assistant ID", &self.assistant_id)?;
        require_id("file ID", file_id)?;
        self.collection().retrieve(file_id).await
    }

    pub async fn delete(&self, file_id: &str) -> Result<Option<Deleted>> {
        require_id("assistant ID", &self.assistant_id)?;
        require_id("file ID", file_id)?;
        self.collection().delete(file_id).await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<AssistantFile>> {
        require_id("assistant ID", &self.assistant_id)?;
        self.collection().list(page).await
    }
}
