//! Run resource types and the run lifecycle model.
//!
//! A run is the only entity with real state-machine semantics. The client
//! never drives a transition directly; it can only create a run, request
//! cancellation, or submit tool outputs while the run is in
//! `requires_action`. Everything else is observed.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Metadata, ThreadParams, Tool};

/// Run status as reported by the service.
///
/// Known transitions: `queued → in_progress → {requires_action, cancelling,
/// completed, failed, expired}`, `requires_action → in_progress` after tool
/// outputs are submitted (or `→ cancelling`), `cancelling → cancelled`.
/// Statuses outside this set are passed through verbatim as [`Other`], never
/// rejected or normalized: the graph models known paths, not all paths.
///
/// [`Other`]: RunStatus::Other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Expired,
    #[serde(untagged)]
    Other(String),
}

impl RunStatus {
    /// Whether no further service-driven transition occurs from this status.
    /// Unrecognized statuses are not assumed terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Cancelled | RunStatus::Failed | RunStatus::Completed | RunStatus::Expired
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Expired => "expired",
            RunStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunErrorCode {
    ServerError,
    RateLimitExceeded,
    #[serde(untagged)]
    Other(String),
}

/// The error attached to a failed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastError {
    pub code: RunErrorCode,
    pub message: String,
}

/// Lifecycle state of a run, folding the status together with the fields
/// that are only meaningful in that status.
///
/// A terminal timestamp lives inside its variant, so a run can never carry
/// both a `completed_at` and a `failed_at`, and a `LastError` can only exist
/// on a [`Failed`](RunState::Failed) run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled { cancelled_at: Option<i64> },
    Failed { failed_at: Option<i64>, error: Option<LastError> },
    Completed { completed_at: Option<i64> },
    Expired,
    Other { status: String },
}

impl RunState {
    pub fn status(&self) -> RunStatus {
        match self {
            RunState::Queued => RunStatus::Queued,
            RunState::InProgress => RunStatus::InProgress,
            RunState::RequiresAction => RunStatus::RequiresAction,
            RunState::Cancelling => RunStatus::Cancelling,
            RunState::Cancelled { .. } => RunStatus::Cancelled,
            RunState::Failed { .. } => RunStatus::Failed,
            RunState::Completed { .. } => RunStatus::Completed,
            RunState::Expired => RunStatus::Expired,
            RunState::Other { status } => RunStatus::Other(status.clone()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Present only on failed runs.
    pub fn last_error(&self) -> Option<&LastError> {
        match self {
            RunState::Failed { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

/// An asynchronous task executing an assistant against a thread.
///
/// All lifecycle fields are written by the service; the client holds a
/// transient, read-only projection. Two retrievals of the same ID return
/// distinct copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RunWire", into = "RunWire")]
pub struct Run {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub thread_id: String,
    pub assistant_id: String,
    pub state: RunState,
    pub started_at: Option<i64>,
    pub expires_at: Option<i64>,
    pub model: String,
    pub instructions: Option<String>,
    pub tools: Vec<Tool>,
    pub file_ids: Vec<String>,
    pub metadata: Metadata,
}

impl Run {
    pub fn status(&self) -> RunStatus {
        self.state.status()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn last_error(&self) -> Option<&LastError> {
        self.state.last_error()
    }
}

/// Flat wire shape of a run. Deserialization folds the status-coupled
/// fields into [`RunState`], dropping (with a warning) any field the
/// reported status does not admit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RunWire {
    id: String,
    #[serde(default)]
    object: String,
    #[serde(default)]
    created_at: i64,
    thread_id: String,
    assistant_id: String,
    status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cancelled_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    failed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_error: Option<LastError>,
    #[serde(default)]
    model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(default)]
    tools: Vec<Tool>,
    #[serde(default)]
    file_ids: Vec<String>,
    #[serde(default)]
    metadata: Metadata,
}

impl From<RunWire> for Run {
    fn from(wire: RunWire) -> Self {
        let RunWire {
            id,
            object,
            created_at,
            thread_id,
            assistant_id,
            status,
            started_at,
            expires_at,
            cancelled_at,
            failed_at,
            completed_at,
            last_error,
            model,
            instructions,
            tools,
            file_ids,
            metadata,
        } = wire;

        if last_error.is_some() && status != RunStatus::Failed {
            tracing::warn!(run = %id, status = %status, "dropping last_error on non-failed run");
        }
        for (field, value, expected) in [
            ("cancelled_at", cancelled_at, RunStatus::Cancelled),
            ("failed_at", failed_at, RunStatus::Failed),
            ("completed_at", completed_at, RunStatus::Completed),
        ] {
            if value.is_some() && status != expected {
                tracing::warn!(run = %id, status = %status, field, "dropping timestamp not matching status");
            }
        }

        let state = match status {
            RunStatus::Queued => RunState::Queued,
            RunStatus::InProgress => RunState::InProgress,
            RunStatus::RequiresAction => RunState::RequiresAction,
            RunStatus::Cancelling => RunState::Cancelling,
            RunStatus::Cancelled => RunState::Cancelled { cancelled_at },
            RunStatus::Failed => RunState::Failed {
                failed_at,
                error: last_error,
            },
            RunStatus::Completed => RunState::Completed { completed_at },
            RunStatus::Expired => RunState::Expired,
            RunStatus::Other(status) => RunState::Other { status },
        };

        Run {
            id,
            object,
            created_at,
            thread_id,
            assistant_id,
            state,
            started_at,
            expires_at,
            model,
            instructions,
            tools,
            file_ids,
            metadata,
        }
    }
}

impl From<Run> for RunWire {
    fn from(run: Run) -> Self {
        let status = run.status();
        let (cancelled_at, failed_at, completed_at, last_error) = match run.state {
            RunState::Cancelled { cancelled_at } => (cancelled_at, None, None, None),
            RunState::Failed { failed_at, error } => (None, failed_at, None, error),
            RunState::Completed { completed_at } => (None, None, completed_at, None),
            _ => (None, None, None, None),
        };

        RunWire {
            id: run.id,
            object: run.object,
            created_at: run.created_at,
            thread_id: run.thread_id,
            assistant_id: run.assistant_id,
            status,
            started_at: run.started_at,
            expires_at: run.expires_at,
            cancelled_at,
            failed_at,
            completed_at,
            last_error,
            model: run.model,
            instructions: run.instructions,
            tools: run.tools,
            file_ids: run.file_ids,
            metadata: run.metadata,
        }
    }
}

/// Parameters for creating a run on a thread.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunParams {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl RunParams {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            ..Self::default()
        }
    }
}

/// Parameters for creating a thread and immediately running it.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadAndRunParams {
    pub assistant_id: String,
    pub thread: ThreadParams,
}

/// The output of one tool call, submitted while a run is in
/// `requires_action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}
