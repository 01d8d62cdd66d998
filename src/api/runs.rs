//! Run operations within a thread.
//!
//! The client never drives a lifecycle transition directly: it creates runs,
//! requests cancellation, and submits tool outputs. Everything else is
//! observed via retrieve/list.

use serde_json::json;

use crate::client::Client;
use crate::error::Result;
use crate::types::{Metadata, Page, PageRequest, Run, RunParams, RunStep, ToolOutput};

use super::{require_id, Collection};

/// Operations on the runs of one thread.
pub struct Runs<'a> {
    client: &'a Client,
    thread_id: String,
}

impl<'a> Runs<'a> {
    pub(crate) fn new(client: &'a Client, thread_id: String) -> Self {
        Self { client, thread_id }
    }

    fn collection(&self) -> Collection<'a, Run> {
        Collection::new(self.client, format!("threads/{}/runs", self.thread_id))
    }

    fn run_path(&self, run_id: &str) -> String {
        format!("threads/{}/runs/{}", self.thread_id, run_id)
    }

    /// Submit a run request; the service enqueues it in `queued`.
    pub async fn create(&self, params: RunParams) -> Result<Run> {
        require_id("thread ID", &self.thread_id)?;
        require_id("assistant ID", &params.assistant_id)?;
        self.collection().create(&params).await
    }

    pub async fn retrieve(&self, run_id: &str) -> Result<Run> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", run_id)?;
        self.collection().retrieve(run_id).await
    }

    pub async fn modify(&self, run_id: &str, metadata: Metadata) -> Result<Run> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", run_id)?;
        self.collection()
            .modify(run_id, &json!({ "metadata": metadata }))
            .await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<Run>> {
        require_id("thread ID", &self.thread_id)?;
        self.collection().list(page).await
    }

    /// Request cancellation. The service may move the run through
    /// `cancelling` to `cancelled`, or refuse if it is already terminal.
    pub async fn cancel(&self, run_id: &str) -> Result<Run> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", run_id)?;
        self.client
            .post_empty(&format!("{}/cancel", self.run_path(run_id)))
            .await
    }

    /// Submit tool outputs for a run in `requires_action`. Submitting
    /// against a terminal run is rejected by the service; that rejection is
    /// surfaced, not retried.
    pub async fn submit_tool_outputs(
        &self,
        run_id: &str,
        tool_outputs: Vec<ToolOutput>,
    ) -> Result<Run> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", run_id)?;
        self.client
            .post_json(
                &format!("{}/submit_tool_outputs", self.run_path(run_id)),
                &json!({ "tool_outputs": tool_outputs }),
            )
            .await
    }

    /// Steps recorded for one run.
    pub fn steps(&self, run_id: impl Into<String>) -> RunSteps<'a> {
        RunSteps {
            client: self.client,
            thread_id: self.thread_id.clone(),
            run_id: run_id.into(),
        }
    }
}

/// Read-only operations on the steps of a run. Steps are append-only on the
/// service side; the client only observes them.
pub struct RunSteps<'a> {
    client: &'a Client,
    thread_id: String,
    run_id: String,
}

impl<'a> RunSteps<'a> {
    fn collection(&self) -> Collection<'a, RunStep> {
        Collection::new(
            self.client,
            format!("threads/{}/runs/{}/steps", self.thread_id, self.run_id),
        )
    }

    pub async fn retrieve(&self, step_id: &str) -> Result<RunStep> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", &self.run_id)?;
        require_id("step ID", step_id)?;
        self.collection().retrieve(step_id).await
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<RunStep>> {
        require_id("thread ID", &self.thread_id)?;
        require_id("run ID", &self.run_id)?;
        self.collection().list(page).await
    }
}
