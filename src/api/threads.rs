//! Thread operations.

use serde_json::json;

use crate::client::Client;
use crate::error::Result;
use crate::types::{Deleted, Metadata, Run, Thread, ThreadAndRunParams, ThreadParams};

use super::{require_id, Collection};

/// Operations on threads.
pub struct Threads<'a> {
    client: &'a Client,
}

impl<'a> Threads<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<'a, Thread> {
        Collection::new(self.client, "threads")
    }

    /// Create a thread seeded with messages. A structurally empty thread is
    /// rejected locally; no request is issued.
    pub async fn create(&self, params: ThreadParams) -> Result<Thread> {
        params.validate()?;
        self.collection().create(&params).await
    }

    pub async fn retrieve(&self, thread_id: &str) -> Result<Thread> {
        require_id("thread ID", thread_id)?;
        self.collection().retrieve(thread_id).await
    }

    pub async fn modify(&self, thread_id: &str, metadata: Metadata) -> Result<Thread> {
        require_id("thread ID", thread_id)?;
        self.collection()
            .modify(thread_id, &json!({ "metadata": metadata }))
            .await
    }

    pub async fn delete(&self, thread_id: &str) -> Result<Option<Deleted>> {
        require_id("thread ID", thread_id)?;
        self.collection().delete(thread_id).await
    }

    /// Create a thread and immediately start a run on it. The service may
    /// accept an empty seed thread here, so only the assistant ID is
    /// validated locally.
    pub async fn create_and_run(&self, params: ThreadAndRunParams) -> Result<Run> {
        require_id("assistant ID", &params.assistant_id)?;
        self.client.post_json("threads/runs", &params).await
    }
}
