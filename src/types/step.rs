//! Run step types.
//!
//! Steps are an append-only record of execution detail inside a run. The
//! client only lists and retrieves them; a step is never mutated once
//! observed.

use serde::{Deserialize, Serialize};

use super::{LastError, Metadata};

/// Step status as reported by the service. Unrecognized statuses pass
/// through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    InProgress,
    Cancelled,
    Failed,
    Completed,
    Expired,
    #[serde(untagged)]
    Other(String),
}

/// One unit of work performed during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunStep {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub assistant_id: String,
    pub thread_id: String,
    pub run_id: String,
    #[serde(rename = "type")]
    pub step_type: String,
    pub status: StepStatus,
    pub step_details: StepDetails,
    #[serde(default)]
    pub metadata: Metadata,
}

/// What the step did: created a message, or invoked tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StepDetails {
    MessageCreation {
        message_creation: MessageCreation,
    },
    ToolCalls {
        tool_calls: Vec<StepToolCall>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageCreation {
    pub message_id: String,
}

/// Detail of one tool invocation within a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepToolCall {
    CodeInterpreter {
        id: String,
        code_interpreter: CodeInterpreterCall,
    },
    Retrieval {
        id: String,
        #[serde(default)]
        retrieval: serde_json::Value,
    },
    Function {
        id: String,
        function: FunctionCall,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodeInterpreterCall {
    pub input: String,
    #[serde(default)]
    pub outputs: Vec<CodeInterpreterOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CodeInterpreterOutput {
    Logs { logs: String },
    Image { image: ImageOutput },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageOutput {
    pub file_id: String,
}

/// A function call recorded in a step, including its output once the run
/// has consumed the submitted tool result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub last_error: Option<LastError>,
}
