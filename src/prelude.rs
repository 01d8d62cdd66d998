//! Convenience re-exports for common use.

pub use crate::client::Client;
pub use crate::config::ClientConfig;
pub use crate::error::{Result, TychoError};
pub use crate::types::{
    Assistant, AssistantParams, FileObject, FileUpload, MessageContent, MessageParams, Order,
    Page, PageRequest, Role, Run, RunParams, RunState, RunStatus, RunStep, Thread,
    ThreadAndRunParams, ThreadMessage, ThreadParams, Tool, ToolOutput,
};
pub use crate::util::retry::RetryPolicy;
