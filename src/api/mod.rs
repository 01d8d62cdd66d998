//! Resource facades over the request pipeline.
//!
//! Every resource kind is the same handful of paths; [`Collection`] holds
//! the one generic CRUD implementation, and the typed facades add
//! per-resource validation and nothing else.

mod assistants;
mod files;
mod messages;
mod multipart;
mod runs;
mod threads;

pub use assistants::{AssistantFiles, Assistants};
pub use files::Files;
pub use messages::{MessageFiles, Messages};
pub use runs::{RunSteps, Runs};
pub use threads::Threads;

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::Client;
use crate::error::{Result, TychoError};
use crate::types::{Deleted, Page, PageRequest};

/// Reject an empty required identifier before any request is built.
pub(crate) fn require_id(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TychoError::InvalidArgument(format!(
            "{name} must be a non-empty string"
        )));
    }
    Ok(())
}

/// Generic CRUD facade over the request pipeline, keyed by a resource path.
pub(crate) struct Collection<'a, T> {
    client: &'a Client,
    base: String,
    _kind: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> Collection<'a, T> {
    pub(crate) fn new(client: &'a Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
            _kind: PhantomData,
        }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }

    pub(crate) async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T> {
        self.client.post_json(&self.base, body).await
    }

    pub(crate) async fn retrieve(&self, id: &str) -> Result<T> {
        self.client.get_json(&self.item_path(id)).await
    }

    pub(crate) async fn modify<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<T> {
        self.client.post_json(&self.item_path(id), body).await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<Option<Deleted>> {
        self.client.delete_json(&self.item_path(id)).await
    }

    pub(crate) async fn list(&self, page: &PageRequest) -> Result<Page<T>> {
        self.client.get_page(&self.base, page).await
    }
}
