//! Thread resource types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TychoError};

use super::{MessageParams, Metadata};

/// A thread of messages that runs execute against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Parameters for creating a thread.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ThreadParams {
    pub messages: Vec<MessageParams>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl ThreadParams {
    pub fn new(messages: Vec<MessageParams>) -> Self {
        Self {
            messages,
            metadata: Metadata::new(),
        }
    }

    /// Reject structurally empty threads before transmission.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(TychoError::InvalidArgument(
                "messages must be a non-empty array".to_string(),
            ));
        }
        for message in &self.messages {
            message.validate()?;
        }
        Ok(())
    }
}
