//! Message resource types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TychoError};

use super::Metadata;

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message within a thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub thread_id: String,
    pub role: Role,
    pub content: Vec<MessageContent>,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// One content block of a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextContent },
    ImageFile { image_file: ImageFile },
}

impl MessageContent {
    /// A plain text block with no annotations.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            text: TextContent {
                value: value.into(),
                annotations: Vec::new(),
            },
        }
    }
}

/// Text content with optional annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A reference to an uploaded image file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFile {
    pub file_id: String,
}

/// An annotation within text content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    /// A citation pointing at a quote from a file.
    FileCitation {
        text: String,
        file_citation: FileCitation,
        start_index: u32,
        end_index: u32,
    },
    /// A path to a file generated by the code interpreter.
    FilePath {
        text: String,
        file_path: FilePathRef,
        start_index: u32,
        end_index: u32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileCitation {
    pub file_id: String,
    #[serde(default)]
    pub quote: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilePathRef {
    pub file_id: String,
}

/// Parameters for creating a message, also used for the seed messages of a
/// new thread.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MessageParams {
    pub role: Role,
    pub content: Vec<MessageContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: Metadata,
}

impl MessageParams {
    /// A user message with a single text block.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![MessageContent::text(text)],
            file_ids: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Structural checks performed before any request is built: content must
    /// be non-empty and every text block must carry a non-empty value.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(TychoError::InvalidArgument(
                "message content must be a non-empty array".to_string(),
            ));
        }
        for block in &self.content {
            if let MessageContent::Text { text } = block {
                if text.value.is_empty() {
                    return Err(TychoError::InvalidArgument(
                        "text content must have a non-empty value".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A file attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageFile {
    pub id: String,
    pub object: String,
    pub created_at: i64,
    pub message_id: String,
    #[serde(default)]
    pub file_id: Option<String>,
}
